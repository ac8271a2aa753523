use std::fmt;

use crate::value::{unwords, Value};

/// Line/column position of a reader failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub fn new(line: usize, col: usize) -> Self {
        Span { line, col }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Everything that can go wrong while reading or evaluating a program.
///
/// The `Display` forms are the user-visible error strings; the driver
/// renders them verbatim, so they carry the full message.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SkiffError {
    #[error("Expected {expected} args; found values {}", unwords(.found))]
    NumArgs { expected: usize, found: Vec<Value> },

    #[error("Invalid type: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: Value },

    #[error("Parse error at {span}: {message}")]
    Parser { message: String, span: Span },

    #[error("{message}: {form}")]
    BadSpecialForm { message: String, form: Value },

    #[error("{message}: {callee}")]
    NotFunction { message: String, callee: String },

    #[error("{message}: {name}")]
    UnboundVar { message: String, name: String },

    #[error("{0}")]
    Default(String),
}

impl SkiffError {
    pub fn num_args(expected: usize, found: &[Value]) -> Self {
        SkiffError::NumArgs {
            expected,
            found: found.to_vec(),
        }
    }

    pub fn type_mismatch(expected: impl Into<String>, found: &Value) -> Self {
        SkiffError::TypeMismatch {
            expected: expected.into(),
            found: found.clone(),
        }
    }

    pub fn bad_form(message: impl Into<String>, form: &Value) -> Self {
        SkiffError::BadSpecialForm {
            message: message.into(),
            form: form.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        let err = SkiffError::num_args(2, &[Value::number(1)]);
        assert_eq!(err.to_string(), "Expected 2 args; found values 1");

        let err = SkiffError::type_mismatch("number", &Value::string("x"));
        assert_eq!(err.to_string(), "Invalid type: expected number, found \"x\"");

        let err = SkiffError::Parser {
            message: "unterminated string".to_string(),
            span: Span::new(2, 7),
        };
        assert_eq!(err.to_string(), "Parse error at 2:7: unterminated string");

        let err = SkiffError::bad_form(
            "Unrecognized special form",
            &Value::List(vec![Value::symbol("huh")]),
        );
        assert_eq!(err.to_string(), "Unrecognized special form: (huh)");

        let err = SkiffError::UnboundVar {
            message: "Getting an unbound variable".to_string(),
            name: "x".to_string(),
        };
        assert_eq!(err.to_string(), "Getting an unbound variable: x");

        let err = SkiffError::NotFunction {
            message: "Not a function".to_string(),
            callee: "1".to_string(),
        };
        assert_eq!(err.to_string(), "Not a function: 1");

        assert_eq!(
            SkiffError::Default("division by zero".to_string()).to_string(),
            "division by zero"
        );
    }

    #[test]
    fn test_num_args_joins_found_values() {
        let err = SkiffError::num_args(2, &[Value::number(1), Value::string("a")]);
        assert_eq!(err.to_string(), "Expected 2 args; found values 1 \"a\"");
        let err = SkiffError::num_args(2, &[]);
        assert_eq!(err.to_string(), "Expected 2 args; found values ");
    }
}
