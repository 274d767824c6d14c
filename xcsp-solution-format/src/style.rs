/// The layout in which an instantiation is written.
///
/// The plain layout is the XML element on its own. Solvers taking part in the XCSP3 competition
/// print their solution as value lines, where every line of the element is prefixed by `v `.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Style {
    /// The bare XML element.
    #[default]
    Plain,
    /// Every line is prefixed by `v `.
    Competition,
}
