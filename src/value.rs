use std::fmt;

/// Arithmetic failure carried as an ordinary result value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    DivisionByZero,
    BadOperator,
    BadNumber,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalError::DivisionByZero => write!(f, "Division By Zero"),
            EvalError::BadOperator => write!(f, "Invalid Operator"),
            EvalError::BadNumber => write!(f, "Invalid Number"),
        }
    }
}

impl std::error::Error for EvalError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Number(i64),
    /// Sticky: once produced, combining it with anything yields the same error.
    Error(EvalError),
}

impl Value {
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }
}

impl From<Result<i64, EvalError>> for Value {
    fn from(result: Result<i64, EvalError>) -> Self {
        match result {
            Ok(n) => Value::Number(n),
            Err(e) => Value::Error(e),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Error(e) => write!(f, "Error: {}", e),
        }
    }
}
