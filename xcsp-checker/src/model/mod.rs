//! The instance against which solutions are verified.
//!
//! An [`Instance`] is built once, e.g. by an instance reader, and is then only read by the
//! checker.

mod condition;
mod constraint;
mod domain;
mod expression;
mod objective;
mod scope;

use std::fmt::Display;
use std::rc::Rc;

pub use condition::*;
pub use constraint::*;
pub use domain::*;
pub use expression::*;
use fnv::FnvHashMap;
pub use objective::*;

/// Variables are identified by their name.
pub type VariableId = Rc<str>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    name: VariableId,
    domain: Domain,
}

impl Variable {
    pub fn name(&self) -> &VariableId {
        &self.name
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn kind(&self) -> VariableKind {
        self.domain.kind()
    }
}

/// Identifies a constraint by its position in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintRef(usize);

impl ConstraintRef {
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for ConstraintRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "constraint #{}", self.0)
    }
}

/// Identifies an objective by its position in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectiveRef(usize);

impl ObjectiveRef {
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for ObjectiveRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "objective #{}", self.0)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Instance {
    variables: Vec<Variable>,
    variable_indices: FnvHashMap<VariableId, usize>,
    constraints: Vec<Constraint>,
    objectives: Vec<Objective>,
}

impl Instance {
    /// Add a new variable to the instance.
    ///
    /// If a variable with the given name exists, its domain is replaced.
    pub fn add_variable(&mut self, name: impl Into<VariableId>, domain: Domain) -> VariableId {
        let name = name.into();

        match self.variable_indices.get(&name) {
            Some(&idx) => self.variables[idx].domain = domain,
            None => {
                let _ = self
                    .variable_indices
                    .insert(Rc::clone(&name), self.variables.len());
                self.variables.push(Variable {
                    name: Rc::clone(&name),
                    domain,
                });
            }
        }

        name
    }

    pub fn add_constraint(&mut self, constraint: Constraint) -> ConstraintRef {
        self.constraints.push(constraint);
        ConstraintRef(self.constraints.len() - 1)
    }

    pub fn add_objective(&mut self, objective: Objective) -> ObjectiveRef {
        self.objectives.push(objective);
        ObjectiveRef(self.objectives.len() - 1)
    }

    /// The variables in declaration order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The constraints in declaration order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// The objectives in declaration order.
    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variable_indices
            .get(name)
            .map(|&idx| &self.variables[idx])
    }

    pub fn iter_constraints(&self) -> impl Iterator<Item = (ConstraintRef, &Constraint)> + '_ {
        self.constraints
            .iter()
            .enumerate()
            .map(|(idx, constraint)| (ConstraintRef(idx), constraint))
    }

    pub fn iter_objectives(&self) -> impl Iterator<Item = (ObjectiveRef, &Objective)> + '_ {
        self.objectives
            .iter()
            .enumerate()
            .map(|(idx, objective)| (ObjectiveRef(idx), objective))
    }

    /// Resolve an array reference such as `x[]`, `x[][]` or `x[2][]` to the variables whose
    /// name starts with `x[` (or `x[2][`), in declaration order.
    ///
    /// Returns `None` if `name` is not an array reference.
    pub fn expand_array(&self, name: &str) -> Option<Vec<VariableId>> {
        let (array, selectors) = name.split_at(name.find("[]")?);
        if array.is_empty() || !selectors.trim_start_matches("[]").is_empty() {
            return None;
        }

        let prefix = format!("{array}[");

        Some(
            self.variables
                .iter()
                .filter(|variable| variable.name.starts_with(&prefix))
                .map(|variable| Rc::clone(&variable.name))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_reference_expands_in_declaration_order() {
        let mut instance = Instance::default();
        let _ = instance.add_variable("x[1]", Domain::from(0..=3));
        let _ = instance.add_variable("xs", Domain::from(0..=3));
        let _ = instance.add_variable("x[0]", Domain::from(0..=3));
        let _ = instance.add_variable("y[0]", Domain::from(0..=3));
        let _ = instance.add_variable("m[1][0]", Domain::from(0..=3));
        let _ = instance.add_variable("m[1][1]", Domain::from(0..=3));
        let _ = instance.add_variable("m[2][0]", Domain::from(0..=3));

        let expanded = instance.expand_array("x[]").expect("array reference");

        assert_eq!(expanded, vec![Rc::<str>::from("x[1]"), Rc::<str>::from("x[0]")]);
        assert_eq!(instance.expand_array("x[0]"), None);
        assert_eq!(instance.expand_array("x[][0]"), None);
        assert_eq!(instance.expand_array("x"), None);
        assert_eq!(
            instance.expand_array("m[1][]"),
            Some(vec![Rc::<str>::from("m[1][0]"), Rc::<str>::from("m[1][1]")])
        );
        assert_eq!(instance.expand_array("m[][]").map(|list| list.len()), Some(3));
    }

    #[test]
    fn redeclared_variable_keeps_its_position() {
        let mut instance = Instance::default();
        let _ = instance.add_variable("a", Domain::from(0..=1));
        let _ = instance.add_variable("b", Domain::from(0..=1));
        let _ = instance.add_variable("a", Domain::from(5..=6));

        assert_eq!(instance.variables().len(), 2);
        assert_eq!(
            instance.variable("a").map(Variable::domain),
            Some(&Domain::from(5..=6))
        );
    }
}
