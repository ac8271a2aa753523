use num_bigint::BigInt;
use skiff_core::{SkiffError, Value};

use crate::register_fn;

pub fn register(env: &skiff_core::Env) {
    register_fn(env, "car", |args| match args {
        [Value::List(items)] if !items.is_empty() => Ok(items[0].clone()),
        [Value::DottedList(head, _)] => Ok(head[0].clone()),
        [other] => Err(SkiffError::type_mismatch("pair", other)),
        _ => Err(SkiffError::num_args(1, args)),
    });

    register_fn(env, "cdr", |args| match args {
        [Value::List(items)] if !items.is_empty() => Ok(Value::List(items[1..].to_vec())),
        [Value::DottedList(head, tail)] if head.len() == 1 => Ok((**tail).clone()),
        [Value::DottedList(head, tail)] => {
            Ok(Value::DottedList(head[1..].to_vec(), tail.clone()))
        }
        [other] => Err(SkiffError::type_mismatch("pair", other)),
        _ => Err(SkiffError::num_args(1, args)),
    });

    // The normalizing constructor gives cons its three shapes: list tail,
    // dotted tail, and plain pair.
    register_fn(env, "cons", |args| match args {
        [head, tail] => Ok(Value::dotted(vec![head.clone()], tail.clone())),
        _ => Err(SkiffError::num_args(2, args)),
    });

    register_fn(env, "list", |args| Ok(Value::List(args.to_vec())));

    register_fn(env, "length", |args| match args {
        [Value::List(items)] => Ok(Value::Number(BigInt::from(items.len()))),
        [other] => Err(SkiffError::type_mismatch("list", other)),
        _ => Err(SkiffError::num_args(1, args)),
    });

    register_fn(env, "reverse", |args| match args {
        [Value::List(items)] => Ok(Value::List(items.iter().rev().cloned().collect())),
        [other] => Err(SkiffError::type_mismatch("list", other)),
        _ => Err(SkiffError::num_args(1, args)),
    });

    // Builds from the right so an improper final argument yields an
    // improper result, as in (append '(1) 2) => (1 . 2).
    register_fn(env, "append", |args| {
        let mut result = match args.last() {
            Some(last) => last.clone(),
            None => Value::nil(),
        };
        for arg in args[..args.len().saturating_sub(1)].iter().rev() {
            match arg {
                Value::List(items) => result = Value::dotted(items.clone(), result),
                other => return Err(SkiffError::type_mismatch("list", other)),
            }
        }
        Ok(result)
    });
}
