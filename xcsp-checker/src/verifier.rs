use std::fmt::Display;
use std::rc::Rc;

use log::debug;
use log::info;
use log::warn;
use xcsp_solution_format::Instantiation;
use xcsp_solution_format::SolutionDocument;
use xcsp_solution_format::Value;

use crate::assignment::Assignment;
use crate::assignment::AssignmentValuation;
use crate::check_constraint;
use crate::evaluate_objective;
use crate::evaluation::CheckError;
use crate::evaluation::EvaluationError;
use crate::evaluation::Valuation;
use crate::model::ConstraintRef;
use crate::model::Instance;
use crate::model::ObjectiveRef;
use crate::model::VariableId;
use crate::symbols::SymbolTable;

/// Errors which make a solution impossible to verify. Such a solution is rejected as a whole.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("the solution lists {variables} variables but {values} values")]
    LengthMismatch { variables: usize, values: usize },

    #[error("variable '{0}' is not declared in the instance")]
    UndeclaredVariable(VariableId),

    #[error("variable '{0}' is assigned more than once")]
    DuplicateAssignment(VariableId),

    #[error("the solution declares {declared} costs but the instance has {objectives} objectives")]
    CostCountMismatch { declared: usize, objectives: usize },

    #[error("variable '{variable}' is used by {used_by} but has no value")]
    UnassignedVariable { variable: VariableId, used_by: Usage },

    #[error("value {value} is outside the domain of variable '{variable}'")]
    ValueOutsideDomain { variable: VariableId, value: Value },
}

/// Where an unassigned variable was needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Usage {
    Constraint(ConstraintRef),
    Objective(ObjectiveRef),
}

impl Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Usage::Constraint(constraint) => write!(f, "{constraint}"),
            Usage::Objective(objective) => write!(f, "{objective}"),
        }
    }
}

/// Controls how much of a solution is verified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifierOptions {
    /// Stop checking constraints after the first violation, and skip the objectives.
    pub stop_at_first_violation: bool,
    /// Compute the objective values and compare them with the declared costs.
    pub check_objectives: bool,
}

impl Default for VerifierOptions {
    fn default() -> Self {
        VerifierOptions {
            stop_at_first_violation: false,
            check_objectives: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    Valid,
    Invalid,
    /// Nothing is violated, but some construct could not be checked.
    Unknown,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Valid => write!(f, "valid"),
            Verdict::Invalid => write!(f, "invalid"),
            Verdict::Unknown => write!(f, "unknown"),
        }
    }
}

/// A violated constraint. The cause is set when the constraint could not be evaluated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub constraint: ConstraintRef,
    pub cause: Option<EvaluationError>,
}

/// An objective whose computed value differs from the declared cost, or which could not be
/// computed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectiveMismatch {
    pub objective: ObjectiveRef,
    pub declared: Option<i64>,
    pub computed: Result<i64, EvaluationError>,
}

/// A construct of the instance which the checker skipped, with the name of its type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnsupportedConstruct {
    Constraint(ConstraintRef, Rc<str>),
    Objective(ObjectiveRef, Rc<str>),
}

/// The outcome of verifying one solution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerificationResult {
    /// The violated constraints, in declaration order.
    pub violations: Vec<Violation>,
    pub objective_mismatches: Vec<ObjectiveMismatch>,
    /// The computed value of every objective that could be evaluated.
    pub objective_values: Vec<(ObjectiveRef, i64)>,
    pub unsupported: Vec<UnsupportedConstruct>,
}

impl VerificationResult {
    pub fn verdict(&self) -> Verdict {
        if !self.violations.is_empty() || !self.objective_mismatches.is_empty() {
            Verdict::Invalid
        } else if !self.unsupported.is_empty() {
            Verdict::Unknown
        } else {
            Verdict::Valid
        }
    }

    pub fn is_valid(&self) -> bool {
        self.verdict() == Verdict::Valid
    }

    pub fn violated_constraints(&self) -> impl Iterator<Item = ConstraintRef> + '_ {
        self.violations.iter().map(|violation| violation.constraint)
    }

    /// The computed value of the given objective, if it could be evaluated.
    pub fn objective_value(&self, objective: ObjectiveRef) -> Option<i64> {
        self.objective_values
            .iter()
            .find(|(reference, _)| *reference == objective)
            .map(|&(_, value)| value)
    }
}

/// Verifies solutions of one instance.
///
/// The verifier owns the table in which symbols are interned, so symbolic values are numbered
/// consistently across all solutions it verifies. Every solution is verified independently of
/// the ones before it.
#[derive(Debug)]
pub struct Verifier<'instance> {
    instance: &'instance Instance,
    symbols: SymbolTable,
    options: VerifierOptions,
}

impl<'instance> Verifier<'instance> {
    pub fn new(instance: &'instance Instance) -> Verifier<'instance> {
        Verifier::with_options(instance, VerifierOptions::default())
    }

    pub fn with_options(
        instance: &'instance Instance,
        options: VerifierOptions,
    ) -> Verifier<'instance> {
        Verifier {
            instance,
            symbols: SymbolTable::default(),
            options,
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Verify every instantiation of the document, in order.
    pub fn verify_document(
        &mut self,
        document: &SolutionDocument,
    ) -> Vec<Result<VerificationResult, VerificationError>> {
        document
            .iter()
            .map(|instantiation| self.verify_instantiation(instantiation))
            .collect()
    }

    /// Verify one solution.
    ///
    /// The assignment is validated first, then all constraints are checked and finally the
    /// objectives are computed. A structural problem with the solution, or a variable without
    /// value in the scope of a checked constraint or objective, aborts verification with an
    /// error.
    pub fn verify_instantiation(
        &mut self,
        instantiation: &Instantiation,
    ) -> Result<VerificationResult, VerificationError> {
        let label = instantiation.id.as_deref().unwrap_or("solution");

        if let Some(costs) = &instantiation.costs {
            let objectives = self.instance.objectives().len();
            if costs.len() != objectives {
                return Err(VerificationError::CostCountMismatch {
                    declared: costs.len(),
                    objectives,
                });
            }
        }

        let assignment = Assignment::build(self.instance, instantiation)?;
        debug!("{label}: assignment of {} variables is valid", assignment.len());

        let mut valuation = AssignmentValuation::new(&assignment, &mut self.symbols);
        let mut result = VerificationResult::default();

        for (constraint_ref, constraint) in self.instance.iter_constraints() {
            if let Err(variable) = resolve_scope(&constraint.scope(), &mut valuation) {
                return Err(VerificationError::UnassignedVariable {
                    variable,
                    used_by: Usage::Constraint(constraint_ref),
                });
            }

            match check_constraint(constraint, &mut valuation) {
                Ok(true) => {}
                Ok(false) => {
                    debug!("{label}: {constraint_ref} ({}) is violated", constraint.name());
                    result.violations.push(Violation {
                        constraint: constraint_ref,
                        cause: None,
                    });
                }
                Err(CheckError::Evaluation(cause)) => {
                    debug!(
                        "{label}: {constraint_ref} ({}) cannot be evaluated: {cause}",
                        constraint.name()
                    );
                    result.violations.push(Violation {
                        constraint: constraint_ref,
                        cause: Some(cause),
                    });
                }
                Err(CheckError::Unsupported(name)) => {
                    warn!("{label}: {constraint_ref} of type '{name}' is not supported");
                    result
                        .unsupported
                        .push(UnsupportedConstruct::Constraint(constraint_ref, name));
                }
                Err(CheckError::Unassigned(variable)) => {
                    return Err(VerificationError::UnassignedVariable {
                        variable,
                        used_by: Usage::Constraint(constraint_ref),
                    });
                }
            }

            if self.options.stop_at_first_violation && !result.violations.is_empty() {
                debug!("{label}: stopping at the first violation");
                break;
            }
        }
        debug!(
            "{label}: checked constraints, {} violated",
            result.violations.len()
        );

        let skip_objectives = !self.options.check_objectives
            || (self.options.stop_at_first_violation && !result.violations.is_empty());

        if !skip_objectives {
            for (objective_ref, objective) in self.instance.iter_objectives() {
                let declared = instantiation
                    .costs
                    .as_ref()
                    .and_then(|costs| costs.get(objective_ref.index()).copied());

                if let Err(variable) = resolve_scope(&objective.scope(), &mut valuation) {
                    return Err(VerificationError::UnassignedVariable {
                        variable,
                        used_by: Usage::Objective(objective_ref),
                    });
                }

                match evaluate_objective(objective, &mut valuation) {
                    Ok(computed) => {
                        result.objective_values.push((objective_ref, computed));

                        if let Some(cost) = declared.filter(|&cost| cost != computed) {
                            debug!(
                                "{label}: {objective_ref} has value {computed}, not the declared {cost}"
                            );
                            result.objective_mismatches.push(ObjectiveMismatch {
                                objective: objective_ref,
                                declared,
                                computed: Ok(computed),
                            });
                        }
                    }
                    Err(CheckError::Evaluation(cause)) => {
                        debug!("{label}: {objective_ref} cannot be evaluated: {cause}");
                        result.objective_mismatches.push(ObjectiveMismatch {
                            objective: objective_ref,
                            declared,
                            computed: Err(cause),
                        });
                    }
                    Err(CheckError::Unsupported(name)) => {
                        warn!("{label}: {objective_ref} of type '{name}' is not supported");
                        result
                            .unsupported
                            .push(UnsupportedConstruct::Objective(objective_ref, name));
                    }
                    Err(CheckError::Unassigned(variable)) => {
                        return Err(VerificationError::UnassignedVariable {
                            variable,
                            used_by: Usage::Objective(objective_ref),
                        });
                    }
                }
            }
            debug!(
                "{label}: checked objectives, {} mismatched",
                result.objective_mismatches.len()
            );
        }

        info!("{label} is {}", result.verdict());

        Ok(result)
    }
}

/// Every variable of a scope must have a value, also those a check would not read for this
/// solution.
fn resolve_scope(scope: &[VariableId], valuation: &mut impl Valuation) -> Result<(), VariableId> {
    match valuation.values(scope) {
        Err(CheckError::Unassigned(variable)) => Err(variable),
        _ => Ok(()),
    }
}

/// Verify every solution in the document against the instance.
pub fn verify(
    instance: &Instance,
    document: &SolutionDocument,
) -> Vec<Result<VerificationResult, VerificationError>> {
    Verifier::new(instance).verify_document(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition;
    use crate::model::AllDifferent;
    use crate::model::BinPacking;
    use crate::model::Cardinality;
    use crate::model::Constraint;
    use crate::model::Cumulative;
    use crate::model::Domain;
    use crate::model::Expr;
    use crate::model::Extremum;
    use crate::model::Index;
    use crate::model::Objective;
    use crate::model::ObjectiveFunction;
    use crate::model::Occurs;
    use crate::model::Operand;
    use crate::model::Operator;
    use crate::model::Sum;
    use crate::test_utils::variables;

    fn instance() -> Instance {
        let mut instance = Instance::default();
        for name in ["a", "b", "c"] {
            let _ = instance.add_variable(name, Domain::from(0..=9));
        }
        let _ = instance.add_constraint(Constraint::AllDifferent(AllDifferent {
            list: variables(["a", "b"]),
            except: vec![],
        }));
        let _ = instance.add_constraint(Constraint::Sum(Sum {
            list: variables(["a", "b"]),
            coefficients: None,
            condition: condition!(<= 5),
        }));
        let _ = instance.add_objective(Objective::minimise(ObjectiveFunction::Variable(
            "a".into(),
        )));
        instance
    }

    fn solution(a: i64, b: i64) -> Instantiation {
        Instantiation::new(["a", "b"], [Value::Int(a), Value::Int(b)])
    }

    #[test]
    fn all_violations_are_reported() {
        let instance = instance();
        let mut verifier = Verifier::new(&instance);

        let result = verifier
            .verify_instantiation(&solution(3, 3))
            .expect("verifiable solution");

        assert_eq!(result.violated_constraints().count(), 2);
        assert_eq!(result.verdict(), Verdict::Invalid);
    }

    #[test]
    fn stop_at_first_violation_skips_the_rest() {
        let instance = instance();
        let options = VerifierOptions {
            stop_at_first_violation: true,
            ..VerifierOptions::default()
        };
        let mut verifier = Verifier::with_options(&instance, options);

        let result = verifier
            .verify_instantiation(&solution(3, 3))
            .expect("verifiable solution");

        assert_eq!(result.violations.len(), 1);
        assert!(result.objective_values.is_empty());
    }

    #[test]
    fn objective_values_are_computed_without_declared_costs() {
        let instance = instance();
        let mut verifier = Verifier::new(&instance);

        let result = verifier
            .verify_instantiation(&solution(1, 2))
            .expect("verifiable solution");

        let (objective, _) = instance.iter_objectives().next().expect("one objective");

        assert!(result.is_valid());
        assert_eq!(result.objective_value(objective), Some(1));
    }

    #[test]
    fn objectives_can_be_skipped() {
        let instance = instance();
        let options = VerifierOptions {
            check_objectives: false,
            ..VerifierOptions::default()
        };
        let mut verifier = Verifier::with_options(&instance, options);

        let result = verifier
            .verify_instantiation(&solution(1, 2).with_costs([7]))
            .expect("verifiable solution");

        assert!(result.is_valid());
        assert!(result.objective_values.is_empty());
    }

    #[test]
    fn wrong_number_of_costs_is_an_error() {
        let instance = instance();
        let mut verifier = Verifier::new(&instance);

        let result = verifier.verify_instantiation(&solution(1, 2).with_costs([1, 2]));

        assert_eq!(
            result,
            Err(VerificationError::CostCountMismatch {
                declared: 2,
                objectives: 1
            })
        );
    }

    #[test]
    fn unassigned_variable_in_scope_is_an_error() {
        let instance = instance();
        let mut verifier = Verifier::new(&instance);
        let instantiation = Instantiation::new(["a"], [Value::Int(1)]);

        let result = verifier.verify_instantiation(&instantiation);

        let (all_different, _) = instance.iter_constraints().next().expect("two constraints");

        assert_eq!(
            result,
            Err(VerificationError::UnassignedVariable {
                variable: "b".into(),
                used_by: Usage::Constraint(all_different),
            })
        );
    }

    #[test]
    fn unsupported_constraint_gives_unknown_verdict() {
        let mut instance = instance();
        let _ = instance.add_constraint(Constraint::Unsupported("knapsack".into()));
        let mut verifier = Verifier::new(&instance);

        let result = verifier
            .verify_instantiation(&solution(1, 2))
            .expect("verifiable solution");

        assert_eq!(result.verdict(), Verdict::Unknown);
        assert!(!result.is_valid());
    }

    /// Verifies a single constraint, with the variable `unassigned` given as `*` and the others
    /// given the listed values.
    fn verify_with_wildcard<const N: usize>(
        constraint: Constraint,
        values: [(&str, i64); N],
        unassigned: &str,
    ) -> (ConstraintRef, Result<VerificationResult, VerificationError>) {
        let mut instance = Instance::default();
        for (name, _) in values {
            let _ = instance.add_variable(name, Domain::from(0..=9));
        }
        let _ = instance.add_variable(unassigned, Domain::from(0..=9));
        let constraint = instance.add_constraint(constraint);

        let instantiation = Instantiation::new(
            values.iter().map(|&(name, _)| name).chain([unassigned]),
            values
                .iter()
                .map(|&(_, value)| Value::Int(value))
                .chain([Value::Unassigned]),
        );

        let result = Verifier::new(&instance).verify_instantiation(&instantiation);
        (constraint, result)
    }

    fn unassigned(variable: &str, constraint: ConstraintRef) -> VerificationError {
        VerificationError::UnassignedVariable {
            variable: variable.into(),
            used_by: Usage::Constraint(constraint),
        }
    }

    #[test]
    fn unassigned_index_of_violated_maximum_is_an_error() {
        let maximum = Constraint::Maximum(Extremum {
            list: variables(["a", "b"]),
            index: Some(Index::new("i")),
            condition: Some(condition!(== 0)),
        });

        let (constraint, result) = verify_with_wildcard(maximum, [("a", 3), ("b", 4)], "i");

        assert_eq!(result, Err(unassigned("i", constraint)));
    }

    #[test]
    fn unassigned_occurrence_count_of_violated_cardinality_is_an_error() {
        let cardinality = Constraint::Cardinality(Cardinality {
            list: variables(["a"]),
            values: vec![Operand::Constant(1)],
            occurs: vec![Occurs::Exactly(Operand::from("k"))],
            closed: true,
        });

        let (constraint, result) = verify_with_wildcard(cardinality, [("a", 5)], "k");

        assert_eq!(result, Err(unassigned("k", constraint)));
    }

    #[test]
    fn unassigned_capacity_without_tasks_is_an_error() {
        let cumulative = Constraint::Cumulative(Cumulative {
            origins: vec![],
            lengths: vec![],
            heights: vec![],
            ends: None,
            condition: condition!(<= var capacity),
        });

        let (constraint, result) = verify_with_wildcard(cumulative, [], "capacity");

        assert_eq!(result, Err(unassigned("capacity", constraint)));
    }

    #[test]
    fn unassigned_bin_capacity_without_items_is_an_error() {
        let bin_packing = Constraint::BinPacking(BinPacking {
            list: vec![],
            sizes: vec![],
            condition: condition!(<= var capacity),
        });

        let (constraint, result) = verify_with_wildcard(bin_packing, [], "capacity");

        assert_eq!(result, Err(unassigned("capacity", constraint)));
    }

    #[test]
    fn unassigned_variable_of_an_objective_is_an_error() {
        let mut instance = Instance::default();
        for name in ["a", "b"] {
            let _ = instance.add_variable(name, Domain::from(0..=9));
        }
        let objective = instance.add_objective(Objective::minimise(ObjectiveFunction::Expression(
            Expr::apply(Operator::Mul, [Expr::Constant(0), Expr::variable("b")]),
        )));
        let instantiation = Instantiation::new(["a", "b"], [Value::Int(1), Value::Unassigned]);

        let result = Verifier::new(&instance).verify_instantiation(&instantiation);

        assert_eq!(
            result,
            Err(VerificationError::UnassignedVariable {
                variable: "b".into(),
                used_by: Usage::Objective(objective),
            })
        );
    }
}
