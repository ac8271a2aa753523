use skiff_core::{SkiffError, Value};

use crate::coerce::{unpack_bool, unpack_num, unpack_str};
use crate::register_fn;

/// Every comparison in the dialect is strictly binary.
fn binary<T>(
    args: &[Value],
    unpack: fn(&Value) -> Result<T, SkiffError>,
    cmp: impl Fn(&T, &T) -> bool,
) -> Result<Value, SkiffError> {
    let [left, right] = args else {
        return Err(SkiffError::num_args(2, args));
    };
    let a = unpack(left)?;
    let b = unpack(right)?;
    Ok(Value::Bool(cmp(&a, &b)))
}

pub fn register(env: &skiff_core::Env) {
    register_fn(env, "=", |args| binary(args, unpack_num, |a, b| a == b));
    register_fn(env, "/=", |args| binary(args, unpack_num, |a, b| a != b));
    register_fn(env, "<", |args| binary(args, unpack_num, |a, b| a < b));
    register_fn(env, ">", |args| binary(args, unpack_num, |a, b| a > b));
    register_fn(env, "<=", |args| binary(args, unpack_num, |a, b| a <= b));
    register_fn(env, ">=", |args| binary(args, unpack_num, |a, b| a >= b));

    register_fn(env, "string=?", |args| {
        binary(args, unpack_str, |a, b| a == b)
    });
    register_fn(env, "string<?", |args| {
        binary(args, unpack_str, |a, b| a < b)
    });
    register_fn(env, "string>?", |args| {
        binary(args, unpack_str, |a, b| a > b)
    });
    register_fn(env, "string<=?", |args| {
        binary(args, unpack_str, |a, b| a <= b)
    });
    register_fn(env, "string>=?", |args| {
        binary(args, unpack_str, |a, b| a >= b)
    });

    register_fn(env, "&&", |args| binary(args, unpack_bool, |a, b| *a && *b));
    register_fn(env, "||", |args| binary(args, unpack_bool, |a, b| *a || *b));
}
