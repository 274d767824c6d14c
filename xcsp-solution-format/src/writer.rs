//! Implements the writing of solution documents.

use std::io::Write;

use crate::Instantiation;
use crate::InstantiationKind;
use crate::Style;

/// Write an instantiation to `writer`.
///
/// # Example
/// ```
/// use xcsp_solution_format::writer::write_instantiation;
/// use xcsp_solution_format::Instantiation;
/// use xcsp_solution_format::Style;
/// use xcsp_solution_format::Value;
///
/// let instantiation =
///     Instantiation::new(["x", "y"], [Value::Int(3), Value::Unassigned]).with_costs([3]);
///
/// let mut output: Vec<u8> = Vec::new();
/// write_instantiation(&mut output, &instantiation, Style::Competition).unwrap();
///
/// let expected = "
/// v <instantiation type=\"solution\" cost=\"3\">
/// v   <list> x y </list>
/// v   <values> 3 * </values>
/// v </instantiation>
/// ";
/// assert_eq!(std::str::from_utf8(&output).unwrap(), expected.trim_start());
/// ```
pub fn write_instantiation(
    writer: &mut impl Write,
    instantiation: &Instantiation,
    style: Style,
) -> std::io::Result<()> {
    let prefix = match style {
        Style::Plain => "",
        Style::Competition => "v ",
    };

    write!(writer, "{prefix}<instantiation")?;

    if let Some(id) = &instantiation.id {
        write!(writer, " id=\"{id}\"")?;
    }

    let kind = match instantiation.kind {
        InstantiationKind::Solution => "solution",
        InstantiationKind::Optimum => "optimum",
    };
    write!(writer, " type=\"{kind}\"")?;

    if let Some(costs) = &instantiation.costs {
        write!(writer, " cost=\"")?;
        write_separated(writer, costs)?;
        write!(writer, "\"")?;
    }
    writeln!(writer, ">")?;

    write!(writer, "{prefix}  <list> ")?;
    write_separated(writer, &instantiation.variables)?;
    writeln!(writer, " </list>")?;

    write!(writer, "{prefix}  <values> ")?;
    write_separated(writer, &instantiation.values)?;
    writeln!(writer, " </values>")?;

    writeln!(writer, "{prefix}</instantiation>")
}

fn write_separated<T: std::fmt::Display>(
    writer: &mut impl Write,
    items: &[T],
) -> std::io::Result<()> {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            write!(writer, " ")?;
        }
        write!(writer, "{item}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_document;
    use crate::Value;

    #[test]
    fn written_instantiation_is_read_back() {
        let mut instantiation = Instantiation::new(
            ["x[0]", "x[1]", "colour"],
            [Value::Int(-2), Value::Unassigned, Value::from("red")],
        )
        .with_costs([4, -1]);
        instantiation.kind = InstantiationKind::Optimum;
        instantiation.id = Some("sol1".into());

        let mut output = Vec::new();
        write_instantiation(&mut output, &instantiation, Style::Plain).expect("write to vec");

        let document = read_document(output.as_slice()).expect("valid document");
        assert_eq!(document.instantiations, vec![instantiation]);
    }
}
