use num_bigint::BigInt;
use skiff_core::{SkiffError, Value};

use crate::register_fn;

pub fn register(env: &skiff_core::Env) {
    register_fn(env, "symbol->string", |args| match args {
        [Value::Symbol(name)] => Ok(Value::String(name.clone())),
        [other] => Err(SkiffError::type_mismatch("symbol", other)),
        _ => Err(SkiffError::num_args(1, args)),
    });

    register_fn(env, "string->symbol", |args| match args {
        [Value::String(text)] => Ok(Value::Symbol(text.clone())),
        [other] => Err(SkiffError::type_mismatch("string", other)),
        _ => Err(SkiffError::num_args(1, args)),
    });

    register_fn(env, "number->string", |args| match args {
        [Value::Number(n)] => Ok(Value::String(n.to_string())),
        [other] => Err(SkiffError::type_mismatch("number", other)),
        _ => Err(SkiffError::num_args(1, args)),
    });

    // Unparsable input yields #f rather than an error.
    register_fn(env, "string->number", |args| match args {
        [Value::String(text)] => Ok(match text.parse::<BigInt>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Bool(false),
        }),
        [other] => Err(SkiffError::type_mismatch("string", other)),
        _ => Err(SkiffError::num_args(1, args)),
    });

    register_fn(env, "string-length", |args| match args {
        [Value::String(text)] => Ok(Value::Number(BigInt::from(text.chars().count()))),
        [other] => Err(SkiffError::type_mismatch("string", other)),
        _ => Err(SkiffError::num_args(1, args)),
    });

    register_fn(env, "string-append", |args| {
        let mut result = String::new();
        for arg in args {
            match arg {
                Value::String(text) => result.push_str(text),
                other => return Err(SkiffError::type_mismatch("string", other)),
            }
        }
        Ok(Value::String(result))
    });
}
