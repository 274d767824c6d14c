use super::CheckError;
use super::EvaluationError;
use super::Valuation;
use crate::model::Expr;
use crate::model::Operator;

/// Evaluate an expression tree to an integer.
///
/// Relational and logical operators yield 1 or 0, and operands of logical operators are true iff
/// they are non-zero. All operands are evaluated, also those of the branch of `if` which is not
/// taken, so every variable of the tree must be assigned.
pub fn evaluate(expr: &Expr, valuation: &mut impl Valuation) -> Result<i64, CheckError> {
    match expr {
        Expr::Constant(value) => Ok(*value),
        Expr::Symbol(symbol) => Ok(valuation.symbol(symbol)),
        Expr::Variable(variable) => valuation.value(variable),
        Expr::Set(_) => Err(EvaluationError::MisplacedSet.into()),
        Expr::Apply(operator, operands) => apply(*operator, operands, valuation),
    }
}

/// A predicate is satisfied iff it evaluates to exactly 1.
pub fn is_satisfied(expr: &Expr, valuation: &mut impl Valuation) -> Result<bool, CheckError> {
    Ok(evaluate(expr, valuation)? == 1)
}

fn apply(
    operator: Operator,
    operands: &[Expr],
    valuation: &mut impl Valuation,
) -> Result<i64, CheckError> {
    check_arity(operator, operands.len())?;

    if let Operator::In | Operator::NotIn = operator {
        let value = evaluate(&operands[0], valuation)?;
        let Expr::Set(items) = &operands[1] else {
            return Err(EvaluationError::MisplacedSet.into());
        };

        let mut is_member = false;
        for item in items {
            is_member |= evaluate(item, valuation)? == value;
        }

        return Ok(i64::from(is_member == (operator == Operator::In)));
    }

    let values = operands
        .iter()
        .map(|operand| evaluate(operand, valuation))
        .collect::<Result<Vec<_>, _>>()?;

    apply_to_values(operator, &values).map_err(CheckError::from)
}

fn apply_to_values(operator: Operator, values: &[i64]) -> Result<i64, EvaluationError> {
    use EvaluationError::Overflow;

    let result = match operator {
        Operator::Neg => values[0].checked_neg().ok_or(Overflow)?,
        Operator::Abs => values[0].checked_abs().ok_or(Overflow)?,
        Operator::Add => values
            .iter()
            .try_fold(0_i64, |acc, &value| acc.checked_add(value))
            .ok_or(Overflow)?,
        Operator::Sub => values[0].checked_sub(values[1]).ok_or(Overflow)?,
        Operator::Mul => values
            .iter()
            .try_fold(1_i64, |acc, &value| acc.checked_mul(value))
            .ok_or(Overflow)?,
        Operator::Div => {
            if values[1] == 0 {
                return Err(EvaluationError::DivisionByZero);
            }
            values[0].checked_div(values[1]).ok_or(Overflow)?
        }
        Operator::Mod => {
            if values[1] == 0 {
                return Err(EvaluationError::DivisionByZero);
            }
            values[0].checked_rem(values[1]).ok_or(Overflow)?
        }
        Operator::Sqr => values[0].checked_mul(values[0]).ok_or(Overflow)?,
        Operator::Pow => pow(values[0], values[1])?,
        Operator::Min => values.iter().copied().min().unwrap_or_default(),
        Operator::Max => values.iter().copied().max().unwrap_or_default(),
        Operator::Dist => values[0]
            .checked_sub(values[1])
            .and_then(i64::checked_abs)
            .ok_or(Overflow)?,
        Operator::Lt => i64::from(values[0] < values[1]),
        Operator::Le => i64::from(values[0] <= values[1]),
        Operator::Ge => i64::from(values[0] >= values[1]),
        Operator::Gt => i64::from(values[0] > values[1]),
        Operator::Ne => i64::from(values[0] != values[1]),
        Operator::Eq => i64::from(values.windows(2).all(|pair| pair[0] == pair[1])),
        Operator::Not => i64::from(values[0] == 0),
        Operator::And => i64::from(values.iter().all(|&value| value != 0)),
        Operator::Or => i64::from(values.iter().any(|&value| value != 0)),
        Operator::Xor => i64::from(values.iter().filter(|&&value| value != 0).count() % 2 == 1),
        Operator::Iff => i64::from(
            values
                .windows(2)
                .all(|pair| (pair[0] != 0) == (pair[1] != 0)),
        ),
        Operator::Imp => i64::from(values[0] == 0 || values[1] != 0),
        Operator::If => {
            if values[0] != 0 {
                values[1]
            } else {
                values[2]
            }
        }
        Operator::In | Operator::NotIn => return Err(EvaluationError::MisplacedSet),
    };

    Ok(result)
}

fn pow(base: i64, exponent: i64) -> Result<i64, EvaluationError> {
    if exponent < 0 {
        return Err(EvaluationError::NegativeExponent(exponent));
    }

    match base {
        0 if exponent > 0 => Ok(0),
        1 => Ok(1),
        -1 => Ok(if exponent % 2 == 0 { 1 } else { -1 }),
        _ => u32::try_from(exponent)
            .ok()
            .and_then(|exponent| base.checked_pow(exponent))
            .ok_or(EvaluationError::Overflow),
    }
}

fn check_arity(operator: Operator, arity: usize) -> Result<(), EvaluationError> {
    let is_valid = match operator {
        Operator::Neg | Operator::Abs | Operator::Sqr | Operator::Not => arity == 1,
        Operator::Sub
        | Operator::Div
        | Operator::Mod
        | Operator::Pow
        | Operator::Dist
        | Operator::Lt
        | Operator::Le
        | Operator::Ge
        | Operator::Gt
        | Operator::Ne
        | Operator::Imp
        | Operator::In
        | Operator::NotIn => arity == 2,
        Operator::If => arity == 3,
        Operator::Add
        | Operator::Mul
        | Operator::Min
        | Operator::Max
        | Operator::And
        | Operator::Or
        | Operator::Xor => arity >= 1,
        Operator::Eq | Operator::Iff => arity >= 2,
    };

    if is_valid {
        Ok(())
    } else {
        Err(EvaluationError::Arity { operator, arity })
    }
}
