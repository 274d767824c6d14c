use std::collections::HashSet;
use std::rc::Rc;

use crate::reader::Error;
use crate::Instantiation;
use crate::InstantiationKind;
use crate::Value;

/// The largest number of values an instantiation may expand to through repetitions.
const MAX_VALUES: usize = 1 << 24;

/// Parses a single `<instantiation>` element.
///
/// See [`ElementParser::parse`] for more information.
pub(super) struct ElementParser<'src, 'data> {
    source: &'src [u8],
    position: usize,
    line_nr: usize,

    identifiers: &'data mut HashSet<Rc<str>>,
}

impl<'src, 'data> ElementParser<'src, 'data> {
    pub(super) fn new(
        source: &'src [u8],
        line_nr: usize,
        identifiers: &'data mut HashSet<Rc<str>>,
    ) -> Self {
        ElementParser {
            source,
            position: 0,
            line_nr,
            identifiers,
        }
    }

    /// Parses an element in the following shape:
    /// ```ignored
    /// "<instantiation" (<attribute>)* ">" (<list> | <values>)* "</instantiation>"
    ///
    /// attribute := "id" "=" <quoted> | "type" "=" <quoted> | "cost" "=" <quoted>
    /// list := "<list>" <identifier>* "</list>"
    /// values := "<values>" <value>* "</values>"
    /// ```
    ///
    /// Leading whitespace, an XML declaration and comments are skipped. Unknown attributes are
    /// ignored. Both the list and the values have to be present exactly once.
    pub(super) fn parse(mut self) -> Result<Instantiation, Error> {
        self.skip_insignificant()?;
        self.consume_str("<instantiation")?;

        let mut instantiation = Instantiation::default();

        loop {
            self.skip_whitespace();

            match self.peek() {
                Some(b'>') => {
                    let _ = self.next();
                    break;
                }
                Some(b'/') => {
                    return Err(self.error("an instantiation needs a list and values", 1));
                }
                Some(_) => {
                    let (name, value) = self.consume_attribute()?;
                    self.apply_attribute(&mut instantiation, name, value)?;
                }
                None => return Err(self.error("unexpected end of the instantiation tag", 0)),
            }
        }

        let mut list = None;
        let mut values = None;

        loop {
            self.skip_insignificant()?;

            if self.try_consume_str("</instantiation") {
                self.skip_whitespace();
                self.consume_str(">")?;
                break;
            } else if self.try_consume_str("<list") {
                if list.is_some() {
                    return Err(self.error("duplicate list element", 5));
                }
                let content = self.consume_element_content("list")?;
                list = Some(
                    content
                        .split_ascii_whitespace()
                        .map(|name| self.intern(name))
                        .collect::<Vec<_>>(),
                );
            } else if self.try_consume_str("<values") {
                if values.is_some() {
                    return Err(self.error("duplicate values element", 7));
                }
                let start = self.position;
                let content = self.consume_element_content("values")?;
                values = Some(self.parse_values(content, start)?);
            } else {
                return Err(self.error("expected <list>, <values> or </instantiation>", 1));
            }
        }

        instantiation.variables = list.ok_or_else(|| self.error("missing list element", 0))?;
        instantiation.values = values.ok_or_else(|| self.error("missing values element", 0))?;

        Ok(instantiation)
    }

    fn apply_attribute(
        &mut self,
        instantiation: &mut Instantiation,
        name: &str,
        value: &str,
    ) -> Result<(), Error> {
        match name {
            "id" => instantiation.id = Some(self.intern(value)),
            "type" => {
                instantiation.kind = match value.trim() {
                    "solution" => InstantiationKind::Solution,
                    "optimum" => InstantiationKind::Optimum,
                    other => {
                        return Err(self.error(format!("unknown instantiation type '{other}'"), 0))
                    }
                }
            }
            "cost" => {
                let costs = value
                    .split_ascii_whitespace()
                    .map(|cost| {
                        cost.parse::<i64>()
                            .map_err(|_| self.error(format!("invalid cost '{cost}'"), 0))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                instantiation.costs = Some(costs);
            }
            _ => {}
        }

        Ok(())
    }

    /// Parses the tokens of a `<values>` element.
    ///
    /// A token is `*`, an integer, a symbol, or a repetition `<v>x<k>` where `v` is `*` or an
    /// integer.
    fn parse_values(&mut self, content: &str, start: usize) -> Result<Vec<Value>, Error> {
        let mut values = vec![];

        for token in content.split_ascii_whitespace() {
            if let Some((value, times)) = split_repetition(token) {
                let value = self.parse_single_value(value, start)?;
                let times = times
                    .parse::<usize>()
                    .ok()
                    .filter(|&times| {
                        values
                            .len()
                            .checked_add(times)
                            .is_some_and(|total| total <= MAX_VALUES)
                    })
                    .ok_or_else(|| {
                        self.error_at(format!("invalid repetition '{token}'"), start, self.position)
                    })?;
                values.extend(std::iter::repeat(value).take(times));
            } else {
                let value = self.parse_single_value(token, start)?;
                values.push(value);
            }
        }

        Ok(values)
    }

    fn parse_single_value(&mut self, token: &str, start: usize) -> Result<Value, Error> {
        if token == "*" {
            return Ok(Value::Unassigned);
        }

        if token.bytes().next().is_some_and(is_start_of_signed_number) {
            return token.parse::<i64>().map(Value::Int).map_err(|_| {
                self.error_at(format!("invalid integer '{token}'"), start, self.position)
            });
        }

        Ok(Value::Symbol(self.intern(token)))
    }

    /// Consumes `name="value"` (or with single quotes), returning the name and the unquoted
    /// value.
    fn consume_attribute(&mut self) -> Result<(&'src str, &'src str), Error> {
        let name_start = self.position;
        while self
            .peek()
            .is_some_and(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b':'))
        {
            let _ = self.next();
        }

        if name_start == self.position {
            return Err(self.error("expected an attribute name", 1));
        }
        let name = self.slice(name_start, self.position)?;

        self.skip_whitespace();
        self.consume_str("=")?;
        self.skip_whitespace();

        let quote = self.consume("quote")?;
        if quote != b'"' && quote != b'\'' {
            return Err(self.error("expected a quoted attribute value", 1));
        }

        let value_start = self.position;
        while self.peek().is_some_and(|byte| byte != quote) {
            let _ = self.next();
        }
        let value = self.slice(value_start, self.position)?;
        let _ = self.consume("closing quote")?;

        Ok((name, value))
    }

    /// Having consumed `<tag`, consumes the rest of the opening tag, the text content and the
    /// closing tag. Returns the text content.
    fn consume_element_content(&mut self, tag: &str) -> Result<&'src str, Error> {
        self.skip_whitespace();
        self.consume_str(">")?;

        let closing_tag = format!("</{tag}");
        let start = self.position;
        let end = find(&self.source[start..], closing_tag.as_bytes())
            .map(|offset| start + offset)
            .ok_or_else(|| self.error(format!("missing {closing_tag}>"), 0))?;

        self.position = end + closing_tag.len();
        self.skip_whitespace();
        self.consume_str(">")?;

        self.slice(start, end)
    }

    /// Skips whitespace, XML declarations (`<?...?>`) and comments (`<!--...-->`).
    pub(super) fn skip_insignificant(&mut self) -> Result<(), Error> {
        loop {
            self.skip_whitespace();

            if self.try_consume_str("<?") {
                self.skip_past("?>")?;
            } else if self.try_consume_str("<!--") {
                self.skip_past("-->")?;
            } else {
                return Ok(());
            }
        }
    }

    /// Returns `true` if nothing but insignificant content remains.
    pub(super) fn is_exhausted(mut self) -> bool {
        self.skip_insignificant().is_ok() && self.peek().is_none()
    }

    fn skip_past(&mut self, terminator: &str) -> Result<(), Error> {
        let offset = find(&self.source[self.position..], terminator.as_bytes())
            .ok_or_else(|| self.error(format!("missing '{terminator}'"), 0))?;
        self.position += offset + terminator.len();
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
            let _ = self.next();
        }
    }

    /// Consume the next byte in the input.
    fn next(&mut self) -> Option<u8> {
        let byte = self.source.get(self.position).copied()?;
        self.position += 1;
        Some(byte)
    }

    /// Look one byte ahead.
    fn peek(&self) -> Option<u8> {
        self.source.get(self.position).copied()
    }

    /// Consume the next byte in the input, and error if it does not exist.
    fn consume(&mut self, expected: &str) -> Result<u8, Error> {
        self.next().ok_or_else(|| Error::ParseError {
            line_nr: self.line_nr,
            reason: format!("unexpected input: expected {expected} - got EOF"),
            span: (self.position, self.position + 1),
        })
    }

    fn consume_str(&mut self, literal: &str) -> Result<(), Error> {
        if self.try_consume_str(literal) {
            Ok(())
        } else {
            Err(self.error(format!("unexpected input: expected {literal}"), 1))
        }
    }

    fn try_consume_str(&mut self, literal: &str) -> bool {
        if self.source[self.position..].starts_with(literal.as_bytes()) {
            self.position += literal.len();
            true
        } else {
            false
        }
    }

    fn slice(&self, start: usize, end: usize) -> Result<&'src str, Error> {
        let source: &'src [u8] = self.source;
        std::str::from_utf8(&source[start..end])
            .map_err(|_| self.error_at("invalid utf8", start, end))
    }

    fn error(&self, reason: impl Into<String>, width: usize) -> Error {
        self.error_at(reason, self.position, self.position + width)
    }

    fn error_at(&self, reason: impl Into<String>, start: usize, end: usize) -> Error {
        Error::ParseError {
            line_nr: self.line_nr,
            reason: reason.into(),
            span: (start, end),
        }
    }

    fn intern(&mut self, string: &str) -> Rc<str> {
        match self.identifiers.get(string) {
            Some(string_ref) => Rc::clone(string_ref),
            None => {
                let string_ref = Rc::from(string);
                let _ = self.identifiers.insert(Rc::clone(&string_ref));
                string_ref
            }
        }
    }
}

/// Splits `<v>x<k>` into `v` and `k`, if `v` is `*` or an integer and `k` is a number.
fn split_repetition(token: &str) -> Option<(&str, &str)> {
    let (value, times) = token.split_once('x')?;

    let is_integer = |s: &str| {
        let digits = s.strip_prefix('-').unwrap_or(s);
        !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit())
    };

    let value_ok = value == "*" || is_integer(value);
    let times_ok = !times.is_empty() && times.bytes().all(|byte| byte.is_ascii_digit());

    (value_ok && times_ok).then_some((value, times))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn is_start_of_signed_number(byte: u8) -> bool {
    byte.is_ascii_digit() || byte == b'-' || byte == b'+'
}
