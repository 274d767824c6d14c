//! This crate contains abstractions for dealing with XCSP3 solution documents. A solution
//! document holds one or more `<instantiation>` elements, each assigning values to a list of
//! variables of an instance:
//! ```xml
//! <instantiation type="solution" cost="7">
//!   <list> x y z </list>
//!   <values> 3 4 * </values>
//! </instantiation>
//! ```
//!
//! To read solution documents see [`reader::SolutionReader`], and to write them see
//! [`writer::write_instantiation`].

mod instantiation;
mod style;
mod value;

pub mod reader;
pub mod writer;

pub use instantiation::*;
pub use style::*;
pub use value::*;
