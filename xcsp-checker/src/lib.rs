//! This crate verifies solutions of XCSP3 instances. Given an [`model::Instance`] and the
//! `<instantiation>` elements of a solution document, it decides for every solution whether it
//! satisfies all constraints and whether the declared costs match the objectives.
//!
//! ```
//! use xcsp_checker::model::{AllDifferent, Constraint, Domain, Instance};
//! use xcsp_checker::xcsp_solution_format::{Instantiation, Value};
//! use xcsp_checker::{Verdict, Verifier};
//!
//! let mut instance = Instance::default();
//! let x = instance.add_variable("x", Domain::from(0..=2));
//! let y = instance.add_variable("y", Domain::from(0..=2));
//! let _ = instance.add_constraint(Constraint::AllDifferent(AllDifferent {
//!     list: vec![x, y],
//!     except: vec![],
//! }));
//!
//! let solution = Instantiation::new(["x", "y"], [Value::Int(0), Value::Int(1)]);
//! let result = Verifier::new(&instance).verify_instantiation(&solution)?;
//!
//! assert_eq!(result.verdict(), Verdict::Valid);
//! # Ok::<(), xcsp_checker::VerificationError>(())
//! ```
//!
//! Solution documents are read with [`xcsp_solution_format::reader`], and all solutions of a
//! document can be verified at once with [`verify`].

mod assignment;
mod constraints;
mod evaluation;
mod objective;
mod symbols;
mod verifier;

pub mod model;

#[cfg(test)]
mod test_utils;

pub use assignment::Assignment;
pub use constraints::check_constraint;
pub use evaluation::evaluate;
pub use evaluation::is_satisfied;
pub use evaluation::CheckError;
pub use evaluation::EvaluationError;
pub use evaluation::Valuation;
pub use objective::evaluate_objective;
pub use symbols::SymbolTable;
pub use verifier::*;
pub use xcsp_solution_format;
pub use xcsp_solution_format::Value;
