use skiff_core::{SkiffError, Value};

use crate::register_fn;

pub fn register(env: &skiff_core::Env) {
    register_fn(env, "symbol?", |args| {
        unary(args).map(|v| Value::Bool(matches!(v, Value::Symbol(_))))
    });

    register_fn(env, "string?", |args| {
        unary(args).map(|v| Value::Bool(matches!(v, Value::String(_))))
    });

    register_fn(env, "number?", |args| {
        unary(args).map(|v| Value::Bool(matches!(v, Value::Number(_))))
    });

    register_fn(env, "boolean?", |args| {
        unary(args).map(|v| Value::Bool(matches!(v, Value::Bool(_))))
    });

    // The empty list is not a pair.
    register_fn(env, "pair?", |args| {
        unary(args).map(|v| {
            Value::Bool(match v {
                Value::List(items) => !items.is_empty(),
                Value::DottedList(..) => true,
                _ => false,
            })
        })
    });

    register_fn(env, "null?", |args| {
        unary(args).map(|v| Value::Bool(matches!(v, Value::List(items) if items.is_empty())))
    });

    register_fn(env, "list?", |args| {
        unary(args).map(|v| Value::Bool(matches!(v, Value::List(_))))
    });

    register_fn(env, "procedure?", |args| {
        unary(args).map(|v| {
            Value::Bool(matches!(
                v,
                Value::PrimitiveFn(_) | Value::IoFn(_) | Value::Func(_)
            ))
        })
    });

    register_fn(env, "port?", |args| {
        unary(args).map(|v| Value::Bool(matches!(v, Value::Port(_))))
    });

    register_fn(env, "not", |args| {
        unary(args).map(|v| Value::Bool(!v.is_truthy()))
    });
}

fn unary(args: &[Value]) -> Result<&Value, SkiffError> {
    match args {
        [value] => Ok(value),
        _ => Err(SkiffError::num_args(1, args)),
    }
}
