use std::rc::Rc;

use super::Condition;
use super::Expr;
use super::VariableId;

/// Either a variable or an integer constant. Used wherever a constraint parameter may be given by
/// a variable, e.g. coefficients of `sum` or lengths of `noOverlap`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    Constant(i64),
    Variable(VariableId),
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Constant(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Variable(value.into())
    }
}

/// An integer or symbolic constant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Literal {
    Int(i64),
    Symbol(Rc<str>),
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Symbol(value.into())
    }
}

/// One entry of an extensional tuple.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Int(i64),
    Symbol(Rc<str>),
    /// The `*` entry, which matches any value.
    Any,
}

/// The constraints which can be checked.
///
/// Every family has its own parameter type, the [`Constraint::Unsupported`] variant stands in for
/// constraints the instance reader recognised but could not map onto one of the families.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    Intension(Expr),
    Extension(Extension),
    Regular(Regular),
    Mdd(Mdd),
    AllDifferent(AllDifferent),
    AllDifferentList(AllDifferentList),
    AllDifferentMatrix(AllDifferentMatrix),
    AllEqual(AllEqual),
    Ordered(Ordered),
    Lex(Lex),
    LexMatrix(LexMatrix),
    Sum(Sum),
    Count(Count),
    NValues(NValues),
    Cardinality(Cardinality),
    Maximum(Extremum),
    Minimum(Extremum),
    Element(Element),
    ElementMatrix(ElementMatrix),
    Channel(Channel),
    ChannelPair(ChannelPair),
    ChannelValue(ChannelValue),
    Stretch(Stretch),
    NoOverlap(NoOverlap),
    Cumulative(Cumulative),
    Instantiation(Instantiation),
    Clause(Clause),
    Circuit(Circuit),
    Precedence(Precedence),
    BinPacking(BinPacking),
    /// A constraint of the named family which the checker cannot verify.
    Unsupported(Rc<str>),
}

impl Constraint {
    /// The name of the constraint family, as it appears in an instance.
    pub fn name(&self) -> &str {
        match self {
            Constraint::Intension(_) => "intension",
            Constraint::Extension(_) => "extension",
            Constraint::Regular(_) => "regular",
            Constraint::Mdd(_) => "mdd",
            Constraint::AllDifferent(_) => "allDifferent",
            Constraint::AllDifferentList(_) => "allDifferentList",
            Constraint::AllDifferentMatrix(_) => "allDifferentMatrix",
            Constraint::AllEqual(_) => "allEqual",
            Constraint::Ordered(_) => "ordered",
            Constraint::Lex(_) => "lex",
            Constraint::LexMatrix(_) => "lexMatrix",
            Constraint::Sum(_) => "sum",
            Constraint::Count(_) => "count",
            Constraint::NValues(_) => "nValues",
            Constraint::Cardinality(_) => "cardinality",
            Constraint::Maximum(_) => "maximum",
            Constraint::Minimum(_) => "minimum",
            Constraint::Element(_) => "element",
            Constraint::ElementMatrix(_) => "elementMatrix",
            Constraint::Channel(_) | Constraint::ChannelPair(_) | Constraint::ChannelValue(_) => {
                "channel"
            }
            Constraint::Stretch(_) => "stretch",
            Constraint::NoOverlap(_) => "noOverlap",
            Constraint::Cumulative(_) => "cumulative",
            Constraint::Instantiation(_) => "instantiation",
            Constraint::Clause(_) => "clause",
            Constraint::Circuit(_) => "circuit",
            Constraint::Precedence(_) => "precedence",
            Constraint::BinPacking(_) => "binPacking",
            Constraint::Unsupported(name) => name,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TableKind {
    #[default]
    Supports,
    Conflicts,
}

/// A table constraint: the tuple of values of `list` must be one of the supports, or none of the
/// conflicts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extension {
    pub list: Vec<VariableId>,
    pub tuples: Vec<Vec<Cell>>,
    pub kind: TableKind,
}

/// A labelled edge of an automaton or decision diagram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: Rc<str>,
    pub value: Literal,
    pub to: Rc<str>,
}

impl Transition {
    pub fn new(from: &str, value: i64, to: &str) -> Transition {
        Transition {
            from: from.into(),
            value: Literal::Int(value),
            to: to.into(),
        }
    }

    pub fn symbolic(from: &str, symbol: &str, to: &str) -> Transition {
        Transition {
            from: from.into(),
            value: Literal::Symbol(symbol.into()),
            to: to.into(),
        }
    }
}

/// The sequence of values of `list` must be accepted by a (possibly non-deterministic)
/// automaton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Regular {
    pub list: Vec<VariableId>,
    pub transitions: Vec<Transition>,
    pub start: Rc<str>,
    pub finals: Vec<Rc<str>>,
}

/// The sequence of values of `list` must label a path of the diagram. The root is the source of
/// the first transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mdd {
    pub list: Vec<VariableId>,
    pub transitions: Vec<Transition>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllDifferent {
    pub list: Vec<VariableId>,
    /// Values which may occur more than once.
    pub except: Vec<Literal>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllDifferentList {
    pub lists: Vec<Vec<VariableId>>,
}

/// The values in every row and in every column are pairwise distinct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllDifferentMatrix {
    pub matrix: Vec<Vec<VariableId>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllEqual {
    pub list: Vec<VariableId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderOperator {
    Lt,
    Le,
    Ge,
    Gt,
}

/// Consecutive variables of `list` are related by `operator`. With lengths, `list[i] +
/// lengths[i] operator list[i + 1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ordered {
    pub list: Vec<VariableId>,
    pub lengths: Option<Vec<Operand>>,
    pub operator: OrderOperator,
}

/// Consecutive lists are lexicographically related by `operator`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lex {
    pub lists: Vec<Vec<VariableId>>,
    pub operator: OrderOperator,
}

/// Both the rows and the columns of the matrix are lexicographically ordered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexMatrix {
    pub matrix: Vec<Vec<VariableId>>,
    pub operator: OrderOperator,
}

/// The (weighted) sum of `list` satisfies `condition`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sum {
    pub list: Vec<VariableId>,
    pub coefficients: Option<Vec<Operand>>,
    pub condition: Condition,
}

/// The number of variables of `list` which take one of `values` satisfies `condition`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Count {
    pub list: Vec<VariableId>,
    pub values: Vec<Operand>,
    pub condition: Condition,
}

/// The number of distinct values in `list`, ignoring `except`, satisfies `condition`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NValues {
    pub list: Vec<VariableId>,
    pub except: Vec<Literal>,
    pub condition: Condition,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Occurs {
    Exactly(Operand),
    /// An inclusive interval.
    Between(i64, i64),
}

/// `values[i]` occurs a number of times in `list` given by `occurs[i]`. When closed, every
/// variable of `list` takes one of `values`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cardinality {
    pub list: Vec<VariableId>,
    pub values: Vec<Operand>,
    pub occurs: Vec<Occurs>,
    pub closed: bool,
}

/// Which of the positions holding the selected value an index variable may point at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rank {
    #[default]
    Any,
    First,
    Last,
}

/// An index variable into a list, where position 0 of the list is numbered `start_index`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Index {
    pub variable: VariableId,
    pub start_index: i64,
    pub rank: Rank,
}

impl Index {
    pub fn new(variable: impl Into<VariableId>) -> Index {
        Index {
            variable: variable.into(),
            start_index: 0,
            rank: Rank::Any,
        }
    }
}

/// Parameters of `maximum` and `minimum`. The extremum satisfies `condition`, and the index
/// points at a position holding the extremum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extremum {
    pub list: Vec<VariableId>,
    pub index: Option<Index>,
    pub condition: Option<Condition>,
}

/// Without an index, `value` occurs in `list`. With an index, `list[index] = value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub list: Vec<Operand>,
    pub value: Operand,
    pub index: Option<Index>,
}

/// `matrix[row][column] = value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementMatrix {
    pub matrix: Vec<Vec<Operand>>,
    pub row: Index,
    pub column: Index,
    pub value: Operand,
}

/// `list[i] = j <=> list[j] = i`, with indices numbered from `start_index`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Channel {
    pub list: Vec<VariableId>,
    pub start_index: i64,
}

/// `first[i] = j => second[j] = i`. When both lists have the same length the relation is
/// required in both directions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelPair {
    pub first: Vec<VariableId>,
    pub first_start_index: i64,
    pub second: Vec<VariableId>,
    pub second_start_index: i64,
}

/// `list` is the 0/1 encoding of `value`: exactly `list[value]` is 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelValue {
    pub list: Vec<VariableId>,
    pub start_index: i64,
    pub value: VariableId,
}

/// Maximal runs of `values[i]` in `list` have a length within `widths[i]`. Every value of
/// `list` is one of `values`. The patterns are forbidden: no run may be directly followed by a
/// run such that the two values form a pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stretch {
    pub list: Vec<VariableId>,
    pub values: Vec<Literal>,
    pub widths: Vec<(i64, i64)>,
    pub patterns: Option<Vec<(Literal, Literal)>>,
}

/// Boxes, given by an origin and a length per dimension, do not overlap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoOverlap {
    pub origins: Vec<Vec<VariableId>>,
    pub lengths: Vec<Vec<Operand>>,
    /// When set, a box with a zero length in some dimension can overlap with anything.
    pub zero_ignored: bool,
}

impl NoOverlap {
    /// Tasks on a single resource.
    pub fn one_dimensional(
        origins: impl IntoIterator<Item = VariableId>,
        lengths: impl IntoIterator<Item = Operand>,
        zero_ignored: bool,
    ) -> NoOverlap {
        NoOverlap {
            origins: origins.into_iter().map(|origin| vec![origin]).collect(),
            lengths: lengths.into_iter().map(|length| vec![length]).collect(),
            zero_ignored,
        }
    }
}

/// At every time point, the summed height of the tasks running at that point satisfies
/// `condition`. A task runs over `[origin, origin + length)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cumulative {
    pub origins: Vec<VariableId>,
    pub lengths: Vec<Operand>,
    pub heights: Vec<Operand>,
    /// When present, `ends[i] = origins[i] + lengths[i]`.
    pub ends: Option<Vec<VariableId>>,
    pub condition: Condition,
}

/// The variables of `list` take exactly `values`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instantiation {
    pub list: Vec<VariableId>,
    pub values: Vec<Literal>,
}

/// At least one of `positive` is non-zero, or at least one of `negative` is zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    pub positive: Vec<VariableId>,
    pub negative: Vec<VariableId>,
}

/// `list[i] = j` is an edge from node `i` to node `j`, with nodes numbered from `start_index`.
/// The edges other than self-loops form one cycle, of length `size` if given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Circuit {
    pub list: Vec<VariableId>,
    pub start_index: i64,
    pub size: Option<Operand>,
}

/// `values[i + 1]` only occurs in `list` after an occurrence of `values[i]`. When covered,
/// every value occurs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Precedence {
    pub list: Vec<VariableId>,
    pub values: Vec<Literal>,
    pub covered: bool,
}

/// `list[i]` is the bin of item `i` of size `sizes[i]`. The load of every used bin satisfies
/// `condition`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinPacking {
    pub list: Vec<VariableId>,
    pub sizes: Vec<Operand>,
    pub condition: Condition,
}
