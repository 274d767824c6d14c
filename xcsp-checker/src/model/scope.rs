use std::rc::Rc;

use fnv::FnvHashSet;

use super::Condition;
use super::ConditionOperand;
use super::Constraint;
use super::Expr;
use super::Index;
use super::Objective;
use super::ObjectiveFunction;
use super::Occurs;
use super::Operand;
use super::VariableId;

/// Collects the distinct variables of a constraint or objective in the order they are first
/// referenced.
#[derive(Debug, Default)]
struct ScopeBuilder {
    seen: FnvHashSet<VariableId>,
    scope: Vec<VariableId>,
}

impl ScopeBuilder {
    fn variable(&mut self, variable: &VariableId) {
        if self.seen.insert(Rc::clone(variable)) {
            self.scope.push(Rc::clone(variable));
        }
    }

    fn variables<'a>(&mut self, variables: impl IntoIterator<Item = &'a VariableId>) {
        for variable in variables {
            self.variable(variable);
        }
    }

    fn operand(&mut self, operand: &Operand) {
        if let Operand::Variable(variable) = operand {
            self.variable(variable);
        }
    }

    fn operands<'a>(&mut self, operands: impl IntoIterator<Item = &'a Operand>) {
        for operand in operands {
            self.operand(operand);
        }
    }

    fn condition(&mut self, condition: &Condition) {
        if let ConditionOperand::Variable(variable) = &condition.operand {
            self.variable(variable);
        }
    }

    fn index(&mut self, index: &Index) {
        self.variable(&index.variable);
    }

    fn expression(&mut self, expression: &Expr) {
        match expression {
            Expr::Variable(variable) => self.variable(variable),
            Expr::Set(operands) | Expr::Apply(_, operands) => {
                for operand in operands {
                    self.expression(operand);
                }
            }
            Expr::Constant(_) | Expr::Symbol(_) => {}
        }
    }
}

impl Constraint {
    /// Every variable the constraint refers to, including those in its parameters such as
    /// coefficients, index variables and the operand of its condition.
    pub fn scope(&self) -> Vec<VariableId> {
        let mut builder = ScopeBuilder::default();

        match self {
            Constraint::Intension(expression) => builder.expression(expression),
            Constraint::Extension(extension) => builder.variables(&extension.list),
            Constraint::Regular(regular) => builder.variables(&regular.list),
            Constraint::Mdd(mdd) => builder.variables(&mdd.list),
            Constraint::AllDifferent(all_different) => builder.variables(&all_different.list),
            Constraint::AllDifferentList(all_different) => {
                builder.variables(all_different.lists.iter().flatten());
            }
            Constraint::AllDifferentMatrix(all_different) => {
                builder.variables(all_different.matrix.iter().flatten());
            }
            Constraint::AllEqual(all_equal) => builder.variables(&all_equal.list),
            Constraint::Ordered(ordered) => {
                builder.variables(&ordered.list);
                builder.operands(ordered.lengths.iter().flatten());
            }
            Constraint::Lex(lex) => builder.variables(lex.lists.iter().flatten()),
            Constraint::LexMatrix(lex) => builder.variables(lex.matrix.iter().flatten()),
            Constraint::Sum(sum) => {
                builder.variables(&sum.list);
                builder.operands(sum.coefficients.iter().flatten());
                builder.condition(&sum.condition);
            }
            Constraint::Count(count) => {
                builder.variables(&count.list);
                builder.operands(&count.values);
                builder.condition(&count.condition);
            }
            Constraint::NValues(n_values) => {
                builder.variables(&n_values.list);
                builder.condition(&n_values.condition);
            }
            Constraint::Cardinality(cardinality) => {
                builder.variables(&cardinality.list);
                builder.operands(&cardinality.values);
                for occurs in &cardinality.occurs {
                    if let Occurs::Exactly(operand) = occurs {
                        builder.operand(operand);
                    }
                }
            }
            Constraint::Maximum(extremum) | Constraint::Minimum(extremum) => {
                builder.variables(&extremum.list);
                if let Some(index) = &extremum.index {
                    builder.index(index);
                }
                if let Some(condition) = &extremum.condition {
                    builder.condition(condition);
                }
            }
            Constraint::Element(element) => {
                builder.operands(&element.list);
                if let Some(index) = &element.index {
                    builder.index(index);
                }
                builder.operand(&element.value);
            }
            Constraint::ElementMatrix(element) => {
                builder.operands(element.matrix.iter().flatten());
                builder.index(&element.row);
                builder.index(&element.column);
                builder.operand(&element.value);
            }
            Constraint::Channel(channel) => builder.variables(&channel.list),
            Constraint::ChannelPair(channel) => {
                builder.variables(&channel.first);
                builder.variables(&channel.second);
            }
            Constraint::ChannelValue(channel) => {
                builder.variables(&channel.list);
                builder.variable(&channel.value);
            }
            Constraint::Stretch(stretch) => builder.variables(&stretch.list),
            Constraint::NoOverlap(no_overlap) => {
                builder.variables(no_overlap.origins.iter().flatten());
                builder.operands(no_overlap.lengths.iter().flatten());
            }
            Constraint::Cumulative(cumulative) => {
                builder.variables(&cumulative.origins);
                builder.operands(&cumulative.lengths);
                builder.operands(&cumulative.heights);
                builder.variables(cumulative.ends.iter().flatten());
                builder.condition(&cumulative.condition);
            }
            Constraint::Instantiation(instantiation) => builder.variables(&instantiation.list),
            Constraint::Clause(clause) => {
                builder.variables(&clause.positive);
                builder.variables(&clause.negative);
            }
            Constraint::Circuit(circuit) => {
                builder.variables(&circuit.list);
                if let Some(size) = &circuit.size {
                    builder.operand(size);
                }
            }
            Constraint::Precedence(precedence) => builder.variables(&precedence.list),
            Constraint::BinPacking(bin_packing) => {
                builder.variables(&bin_packing.list);
                builder.operands(&bin_packing.sizes);
                builder.condition(&bin_packing.condition);
            }
            Constraint::Unsupported(_) => {}
        }

        builder.scope
    }
}

impl Objective {
    /// Every variable the objective function refers to.
    pub fn scope(&self) -> Vec<VariableId> {
        let mut builder = ScopeBuilder::default();

        match &self.function {
            ObjectiveFunction::Variable(variable) => builder.variable(variable),
            ObjectiveFunction::Expression(expression) => builder.expression(expression),
            ObjectiveFunction::Aggregate(aggregate) => builder.variables(&aggregate.list),
            ObjectiveFunction::Unsupported(_) => {}
        }

        builder.scope
    }
}
