use std::fmt::Display;
use std::rc::Rc;

/// A value in the `<values>` element of an instantiation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    /// The value of an integer variable.
    Int(i64),
    /// The value of a symbolic variable.
    Symbol(Rc<str>),
    /// The `*` token. The variable is intentionally left without a value.
    Unassigned,
}

impl Value {
    /// Returns `true` if this is the [`Value::Unassigned`] wildcard.
    pub fn is_unassigned(&self) -> bool {
        matches!(self, Value::Unassigned)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Symbol(value.into())
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Symbol(symbol) => write!(f, "{symbol}"),
            Value::Unassigned => write!(f, "*"),
        }
    }
}
