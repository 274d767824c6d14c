//! Implements the parsing of solution documents.
//!
//! See [`SolutionReader`] for information on how to parse a solution document.

mod error;
mod parser;

use std::collections::HashSet;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::rc::Rc;

pub use error::Error;
use parser::ElementParser;

use crate::Instantiation;
use crate::SolutionDocument;

const OPENING_TAG: &str = "<instantiation";
const CLOSING_TAG: &str = "</instantiation>";

/// Used to read and parse solution documents.
///
/// The reader reads the source line-by-line and yields the `<instantiation>` elements in the
/// order in which they appear. Elements may span several lines, and several elements may appear
/// in one document.
///
/// Solver output in the XCSP3 competition format is understood as well: outside of an element,
/// lines starting with `c`, `s`, `o` or `d` are skipped, and a `v ` prefix is removed. If the
/// line that opens an element carries the `v ` prefix, the prefix is removed from all lines of
/// that element.
///
/// Note that the reader does not check the instantiation against an instance. It will happily
/// return an instantiation with more values than variables.
///
/// # Example
/// ```
/// use xcsp_solution_format::reader::SolutionReader;
/// use xcsp_solution_format::Value;
///
/// let source = r#"
/// s SATISFIABLE
/// v <instantiation type="solution" cost="7">
/// v   <list> x y z </list>
/// v   <values> 3 4 * </values>
/// v </instantiation>
/// "#;
///
/// let mut reader = SolutionReader::new(source.as_bytes());
///
/// let instantiation = reader
///     .next_instantiation()
///     .expect("valid instantiation")
///     .expect("one instantiation in the source");
/// assert_eq!(instantiation.costs, Some(vec![7]));
/// assert_eq!(
///     instantiation.values,
///     vec![Value::Int(3), Value::Int(4), Value::Unassigned]
/// );
///
/// let end = reader.next_instantiation().expect("finished reading source");
/// assert_eq!(None, end);
/// ```
#[derive(Debug)]
pub struct SolutionReader<R> {
    source: BufReader<R>,
    line_buffer: String,
    /// Unwrapped content which has not been consumed by an element yet.
    pending: String,
    /// The line on which the content in `pending` starts.
    pending_line_nr: usize,
    /// `Some(wrapped)` when `pending` contains an opening tag, where `wrapped` indicates the
    /// element is written in competition lines.
    open_element: Option<bool>,
    line_nr: usize,
    identifiers: HashSet<Rc<str>>,
}

impl<R: Read> SolutionReader<R> {
    /// Construct a new solution reader which reads from `source`.
    pub fn new(source: R) -> SolutionReader<R> {
        SolutionReader {
            source: BufReader::new(source),
            line_buffer: String::new(),
            pending: String::new(),
            pending_line_nr: 1,
            open_element: None,
            line_nr: 0,
            identifiers: HashSet::new(),
        }
    }

    /// Read the next instantiation in the document.
    ///
    /// If reading is successful, `Some(instantiation)` is returned, or `None` if the end of the
    /// document is reached. On an error, be it from IO or other, the `Err` variant is returned.
    pub fn next_instantiation(&mut self) -> Result<Option<Instantiation>, Error> {
        loop {
            if let Some(end) = self.pending.find(CLOSING_TAG) {
                let element = self
                    .pending
                    .drain(..end + CLOSING_TAG.len())
                    .collect::<String>();

                let instantiation =
                    ElementParser::new(element.as_bytes(), self.pending_line_nr, &mut self.identifiers)
                        .parse()?;

                self.pending_line_nr = self.line_nr;
                if !self.pending.contains(OPENING_TAG) {
                    self.open_element = None;
                }

                return Ok(Some(instantiation));
            }

            self.line_buffer.clear();
            let read_bytes = self.source.read_line(&mut self.line_buffer)?;

            if read_bytes == 0 {
                // The end of the file has been reached.
                let mut identifiers = HashSet::new();
                let exhausted =
                    ElementParser::new(self.pending.as_bytes(), self.pending_line_nr, &mut identifiers)
                        .is_exhausted();

                return if exhausted {
                    Ok(None)
                } else {
                    Err(Error::UnterminatedInstantiation {
                        line_nr: self.pending_line_nr,
                    })
                };
            }

            self.line_nr += 1;
            self.push_line();
        }
    }

    /// Read all remaining instantiations.
    pub fn read_document(mut self) -> Result<SolutionDocument, Error> {
        let mut instantiations = vec![];

        while let Some(instantiation) = self.next_instantiation()? {
            instantiations.push(instantiation);
        }

        Ok(SolutionDocument { instantiations })
    }

    /// Append the content of the line in `line_buffer` to the pending content.
    fn push_line(&mut self) {
        let line = self.line_buffer.trim_end_matches(['\n', '\r']);

        let content = match self.open_element {
            Some(true) => unwrap_value_line(line).unwrap_or(line),
            Some(false) => line,
            None => {
                if is_competition_comment(line) {
                    return;
                }

                let (content, wrapped) = match unwrap_value_line(line) {
                    Some(content) => (content, true),
                    None => (line, false),
                };

                if self.pending.trim().is_empty() {
                    self.pending.clear();
                    self.pending_line_nr = self.line_nr;
                }

                if content.contains(OPENING_TAG) {
                    self.open_element = Some(wrapped);
                }

                content
            }
        };

        self.pending.push_str(content);
        self.pending.push('\n');
    }
}

impl SolutionReader<Box<dyn Read>> {
    /// Open the solution document at `path`.
    ///
    /// If the path ends in `.gz`, the file is assumed to be GZipped and it is decompressed
    /// on-the-fly.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let is_gzipped = path.extension().is_some_and(|extension| extension == "gz");

        #[cfg(feature = "gzipped-solutions")]
        let source: Box<dyn Read> = if is_gzipped {
            Box::new(flate2::read::MultiGzDecoder::new(file))
        } else {
            Box::new(file)
        };

        #[cfg(not(feature = "gzipped-solutions"))]
        let source: Box<dyn Read> = {
            let _ = is_gzipped;
            Box::new(file)
        };

        Ok(SolutionReader::new(source))
    }
}

/// Read the whole solution document from `source`.
pub fn read_document(source: impl Read) -> Result<SolutionDocument, Error> {
    SolutionReader::new(source).read_document()
}

/// Strips the `v` prefix of a competition value line.
fn unwrap_value_line(line: &str) -> Option<&str> {
    if line == "v" {
        Some("")
    } else {
        line.strip_prefix("v ")
    }
}

/// Comment, status, objective and diagnostic lines of the competition output format.
fn is_competition_comment(line: &str) -> bool {
    let mut bytes = line.bytes();

    match (bytes.next(), bytes.next()) {
        (Some(b'c' | b's' | b'o' | b'd'), None) => true,
        (Some(b'c' | b's' | b'o' | b'd'), Some(second)) => second.is_ascii_whitespace(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn multiple_instantiations_are_read_in_order() {
        let source = "<instantiation><list>x</list><values>1</values></instantiation>\n\
                      <instantiation>\n<list>x</list>\n<values>2</values>\n</instantiation>\n";

        let document = read_document(source.as_bytes()).expect("valid document");

        assert_eq!(document.len(), 2);
        assert_eq!(document.instantiations[0].values, vec![Value::Int(1)]);
        assert_eq!(document.instantiations[1].values, vec![Value::Int(2)]);
    }

    #[test]
    fn competition_comments_are_skipped() {
        let source = "c found by local search\no 12\nv <instantiation cost=\"12\">\nv <list> a </list> <values> 12 </values>\nv </instantiation>\ns OPTIMUM FOUND\n";

        let document = read_document(source.as_bytes()).expect("valid document");

        assert_eq!(document.len(), 1);
        assert_eq!(document.instantiations[0].costs, Some(vec![12]));
    }

    #[test]
    fn plain_elements_keep_lines_that_look_like_comments() {
        let source = "<instantiation>\n<list>\nc d\n</list>\n<values>\n1 2\n</values>\n</instantiation>\n";

        let document = read_document(source.as_bytes()).expect("valid document");

        assert_eq!(
            document.instantiations[0].variables,
            vec![Rc::<str>::from("c"), Rc::<str>::from("d")]
        );
    }

    #[test]
    fn unterminated_instantiation_is_an_error() {
        let source = "<instantiation>\n<list> x </list>\n";

        let result = read_document(source.as_bytes());

        assert!(matches!(
            result,
            Err(Error::UnterminatedInstantiation { line_nr: 1 })
        ));
    }

    #[test]
    fn malformed_repetition_is_a_parse_error() {
        let source = "<instantiation>\n<list>x</list>\n<values>0x18446744073709551615</values>\n</instantiation>\n";

        let result = read_document(source.as_bytes());

        assert!(matches!(result, Err(Error::ParseError { .. })));
    }

    #[test]
    fn empty_document_has_no_instantiations() {
        let document =
            read_document("<?xml version=\"1.0\"?>\n\n".as_bytes()).expect("valid document");

        assert!(document.is_empty());
    }
}
