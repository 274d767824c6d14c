use std::fmt::Display;
use std::rc::Rc;

use super::VariableId;

/// The operators which may occur in an intensional expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Neg,
    Abs,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Sqr,
    Pow,
    Min,
    Max,
    Dist,
    Lt,
    Le,
    Ge,
    Gt,
    Ne,
    Eq,
    In,
    NotIn,
    Not,
    And,
    Or,
    Xor,
    Iff,
    Imp,
    If,
}

impl Operator {
    /// The name of the operator in functional notation.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Neg => "neg",
            Operator::Abs => "abs",
            Operator::Add => "add",
            Operator::Sub => "sub",
            Operator::Mul => "mul",
            Operator::Div => "div",
            Operator::Mod => "mod",
            Operator::Sqr => "sqr",
            Operator::Pow => "pow",
            Operator::Min => "min",
            Operator::Max => "max",
            Operator::Dist => "dist",
            Operator::Lt => "lt",
            Operator::Le => "le",
            Operator::Ge => "ge",
            Operator::Gt => "gt",
            Operator::Ne => "ne",
            Operator::Eq => "eq",
            Operator::In => "in",
            Operator::NotIn => "notin",
            Operator::Not => "not",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Xor => "xor",
            Operator::Iff => "iff",
            Operator::Imp => "imp",
            Operator::If => "if",
        }
    }

    /// Look up an operator by its name in functional notation.
    pub fn from_name(name: &str) -> Option<Operator> {
        let operator = match name {
            "neg" => Operator::Neg,
            "abs" => Operator::Abs,
            "add" => Operator::Add,
            "sub" => Operator::Sub,
            "mul" => Operator::Mul,
            "div" => Operator::Div,
            "mod" => Operator::Mod,
            "sqr" => Operator::Sqr,
            "pow" => Operator::Pow,
            "min" => Operator::Min,
            "max" => Operator::Max,
            "dist" => Operator::Dist,
            "lt" => Operator::Lt,
            "le" => Operator::Le,
            "ge" => Operator::Ge,
            "gt" => Operator::Gt,
            "ne" => Operator::Ne,
            "eq" => Operator::Eq,
            "in" => Operator::In,
            "notin" => Operator::NotIn,
            "not" => Operator::Not,
            "and" => Operator::And,
            "or" => Operator::Or,
            "xor" => Operator::Xor,
            "iff" => Operator::Iff,
            "imp" => Operator::Imp,
            "if" => Operator::If,
            _ => return None,
        };

        Some(operator)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An intensional expression tree.
///
/// Symbols evaluate to the integer they are interned as, so they can be compared with symbolic
/// variables. Sets only have a meaning as the second operand of `in` and `notin`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Constant(i64),
    Symbol(Rc<str>),
    Variable(VariableId),
    Set(Vec<Expr>),
    Apply(Operator, Vec<Expr>),
}

impl Expr {
    pub fn variable(name: impl Into<VariableId>) -> Expr {
        Expr::Variable(name.into())
    }

    pub fn apply(operator: Operator, operands: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Apply(operator, operands.into_iter().collect())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::Constant(value)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Constant(value) => write!(f, "{value}"),
            Expr::Symbol(symbol) => write!(f, "{symbol}"),
            Expr::Variable(name) => write!(f, "{name}"),
            Expr::Set(items) => {
                write!(f, "set(")?;
                write_arguments(f, items)?;
                write!(f, ")")
            }
            Expr::Apply(operator, operands) => {
                write!(f, "{operator}(")?;
                write_arguments(f, operands)?;
                write!(f, ")")
            }
        }
    }
}

fn write_arguments(f: &mut std::fmt::Formatter<'_>, arguments: &[Expr]) -> std::fmt::Result {
    for (idx, argument) in arguments.iter().enumerate() {
        if idx > 0 {
            write!(f, ",")?;
        }
        write!(f, "{argument}")?;
    }

    Ok(())
}
