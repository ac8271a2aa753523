use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;
use skiff_core::{SkiffError, Value};

use crate::coerce::unpack_num;
use crate::register_fn;

pub fn register(env: &skiff_core::Env) {
    register_fn(env, "+", |args| fold_numeric(args, |a, b| Ok(a + b)));
    register_fn(env, "-", |args| fold_numeric(args, |a, b| Ok(a - b)));
    register_fn(env, "*", |args| fold_numeric(args, |a, b| Ok(a * b)));

    // Division truncates toward zero; the host type panics on a zero
    // divisor, so that case is surfaced as an error here.
    register_fn(env, "/", |args| {
        fold_numeric(args, |a, b| {
            if b.is_zero() {
                Err(SkiffError::Default("division by zero".to_string()))
            } else {
                Ok(a / b)
            }
        })
    });
    register_fn(env, "quotient", |args| {
        fold_numeric(args, |a, b| {
            if b.is_zero() {
                Err(SkiffError::Default("division by zero".to_string()))
            } else {
                Ok(a / b)
            }
        })
    });

    // `remainder` takes the sign of the dividend, `mod` the sign of the
    // divisor.
    register_fn(env, "remainder", |args| {
        fold_numeric(args, |a, b| {
            if b.is_zero() {
                Err(SkiffError::Default("division by zero".to_string()))
            } else {
                Ok(a % b)
            }
        })
    });
    register_fn(env, "mod", |args| {
        fold_numeric(args, |a, b| {
            if b.is_zero() {
                Err(SkiffError::Default("division by zero".to_string()))
            } else {
                Ok(a.mod_floor(b))
            }
        })
    });
}

/// Left fold over two or more numeric arguments.
fn fold_numeric(
    args: &[Value],
    op: impl Fn(BigInt, &BigInt) -> Result<BigInt, SkiffError>,
) -> Result<Value, SkiffError> {
    if args.len() < 2 {
        return Err(SkiffError::num_args(2, args));
    }
    let nums: Vec<BigInt> = args.iter().map(unpack_num).collect::<Result<_, _>>()?;
    let mut acc = nums[0].clone();
    for n in &nums[1..] {
        acc = op(acc, n)?;
    }
    Ok(Value::Number(acc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use skiff_core::Env;

    fn call(env: &Env, name: &str, args: &[Value]) -> Result<Value, SkiffError> {
        match env.get(name) {
            Some(Value::PrimitiveFn(prim)) => (prim.func)(args),
            other => panic!("{name} not registered: {other:?}"),
        }
    }

    fn n(v: i64) -> Value {
        Value::number(v)
    }

    #[test]
    fn test_folds_left() {
        let env = Env::new();
        register(&env);
        assert_eq!(call(&env, "+", &[n(1), n(2), n(3)]).unwrap(), n(6));
        assert_eq!(call(&env, "-", &[n(10), n(1), n(2)]).unwrap(), n(7));
        assert_eq!(call(&env, "*", &[n(2), n(3), n(4)]).unwrap(), n(24));
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        let env = Env::new();
        register(&env);
        assert_eq!(call(&env, "/", &[n(7), n(2)]).unwrap(), n(3));
        assert_eq!(call(&env, "/", &[n(-7), n(2)]).unwrap(), n(-3));
        assert_eq!(call(&env, "quotient", &[n(-7), n(2)]).unwrap(), n(-3));
    }

    #[test]
    fn test_mod_and_remainder_signs() {
        let env = Env::new();
        register(&env);
        assert_eq!(call(&env, "remainder", &[n(-7), n(2)]).unwrap(), n(-1));
        assert_eq!(call(&env, "remainder", &[n(7), n(-2)]).unwrap(), n(1));
        assert_eq!(call(&env, "mod", &[n(-7), n(2)]).unwrap(), n(1));
        assert_eq!(call(&env, "mod", &[n(7), n(-2)]).unwrap(), n(-1));
    }

    #[test]
    fn test_division_by_zero() {
        let env = Env::new();
        register(&env);
        for op in ["/", "quotient", "remainder", "mod"] {
            let err = call(&env, op, &[n(1), n(0)]).unwrap_err();
            assert!(matches!(err, SkiffError::Default(_)), "{op}: {err}");
        }
    }

    #[test]
    fn test_arity_floor() {
        let env = Env::new();
        register(&env);
        let err = call(&env, "+", &[n(1)]).unwrap_err();
        assert!(matches!(err, SkiffError::NumArgs { expected: 2, .. }));
        let err = call(&env, "*", &[]).unwrap_err();
        assert!(matches!(err, SkiffError::NumArgs { expected: 2, .. }));
    }

    #[test]
    fn test_string_coercion() {
        let env = Env::new();
        register(&env);
        assert_eq!(
            call(&env, "+", &[Value::string("2"), n(3)]).unwrap(),
            n(5)
        );
        assert_eq!(
            call(&env, "+", &[Value::string("-2"), n(3)]).unwrap(),
            n(1)
        );
        let err = call(&env, "+", &[Value::string("two"), n(3)]).unwrap_err();
        assert!(matches!(err, SkiffError::TypeMismatch { .. }));
    }
}
