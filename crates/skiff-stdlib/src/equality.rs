use skiff_core::{SkiffError, Value};

use crate::coerce::{unpack_bool, unpack_num, unpack_str};
use crate::register_fn;

pub fn register(env: &skiff_core::Env) {
    register_fn(env, "eq?", eqv);
    register_fn(env, "eqv?", eqv);

    // `equal?` additionally tries the numeric, string, and boolean
    // coercions on both sides; a failed coercion just means "not equal
    // that way", never an error.
    register_fn(env, "equal?", |args| {
        let [left, right] = args else {
            return Err(SkiffError::num_args(2, args));
        };
        Ok(Value::Bool(coercible_equal(left, right) || left == right))
    });
}

/// Structural equality per variant, recursive through pairs. `PartialEq`
/// on `Value` is written to be exactly this relation.
fn eqv(args: &[Value]) -> Result<Value, SkiffError> {
    let [left, right] = args else {
        return Err(SkiffError::num_args(2, args));
    };
    Ok(Value::Bool(left == right))
}

fn coercible_equal(a: &Value, b: &Value) -> bool {
    if let (Ok(x), Ok(y)) = (unpack_num(a), unpack_num(b)) {
        if x == y {
            return true;
        }
    }
    if let (Ok(x), Ok(y)) = (unpack_str(a), unpack_str(b)) {
        if x == y {
            return true;
        }
    }
    if let (Ok(x), Ok(y)) = (unpack_bool(a), unpack_bool(b)) {
        if x == y {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use skiff_core::Env;

    fn call(env: &Env, name: &str, args: &[Value]) -> Value {
        match env.get(name) {
            Some(Value::PrimitiveFn(prim)) => (prim.func)(args).expect("primitive failed"),
            other => panic!("{name} not registered: {other:?}"),
        }
    }

    fn n(v: i64) -> Value {
        Value::number(v)
    }

    #[test]
    fn test_eqv_is_structural() {
        let env = Env::new();
        register(&env);
        let list = Value::List(vec![n(1), n(2)]);
        assert_eq!(call(&env, "eqv?", &[list.clone(), list]), Value::Bool(true));
        assert_eq!(
            call(&env, "eqv?", &[n(2), Value::string("2")]),
            Value::Bool(false)
        );
        assert_eq!(
            call(&env, "eq?", &[Value::symbol("a"), Value::symbol("a")]),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_equal_coerces_across_types() {
        let env = Env::new();
        register(&env);
        assert_eq!(
            call(&env, "equal?", &[n(2), Value::string("2")]),
            Value::Bool(true)
        );
        assert_eq!(
            call(&env, "equal?", &[Value::Bool(true), Value::string("#t")]),
            Value::Bool(true)
        );
        assert_eq!(
            call(&env, "equal?", &[n(2), Value::string("3")]),
            Value::Bool(false)
        );
        // eqv? implies equal?
        let dotted = Value::dotted(vec![n(1)], n(2));
        assert_eq!(
            call(&env, "equal?", &[dotted.clone(), dotted]),
            Value::Bool(true)
        );
    }
}
