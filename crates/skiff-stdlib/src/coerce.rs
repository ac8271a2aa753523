use num_bigint::BigInt;
use skiff_core::{SkiffError, Value};

/// Coerce a value to an integer for a numeric context.
///
/// Beyond actual numbers, a string that fully parses as a signed integer
/// counts, and a single-element list is unwrapped recursively. Anything
/// else is a type mismatch, which `equal?` treats as "this coercion does
/// not apply".
pub fn unpack_num(value: &Value) -> Result<BigInt, SkiffError> {
    match value {
        Value::Number(n) => Ok(n.clone()),
        Value::String(s) => s
            .parse()
            .map_err(|_| SkiffError::type_mismatch("number", value)),
        Value::List(items) if items.len() == 1 => unpack_num(&items[0]),
        _ => Err(SkiffError::type_mismatch("number", value)),
    }
}

/// Coerce a value to a string: numbers and booleans stringify via their
/// display forms.
pub fn unpack_str(value: &Value) -> Result<String, SkiffError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(true) => Ok("#t".to_string()),
        Value::Bool(false) => Ok("#f".to_string()),
        _ => Err(SkiffError::type_mismatch("string", value)),
    }
}

/// Booleans only; nothing else coerces.
pub fn unpack_bool(value: &Value) -> Result<bool, SkiffError> {
    match value {
        Value::Bool(b) => Ok(*b),
        _ => Err(SkiffError::type_mismatch("boolean", value)),
    }
}
