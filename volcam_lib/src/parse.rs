//! Parsing of whitespace separated numeric text files
//! Used by view files and transfer function files

use nom::{
    character::complete::{space0, space1},
    combinator::all_consuming,
    multi::separated_list1,
    number::complete::float,
    sequence::delimited,
    IResult,
};
use thiserror::Error;

/// Malformed line in a text file
#[derive(Error, Debug, PartialEq)]
#[error("line {line}: {message}")]
pub struct LineError {
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

fn float_row(input: &str) -> IResult<&str, Vec<f32>> {
    all_consuming(delimited(space0, separated_list1(space1, float), space0))(input)
}

/// Parse text where every line holds exactly `N` numbers.
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_float_rows<const N: usize>(text: &str) -> Result<Vec<[f32; N]>, LineError> {
    let mut rows = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (_, values) = float_row(trimmed).map_err(|_| LineError {
            line: i + 1,
            message: format!("expected {N} numbers, found `{trimmed}`"),
        })?;

        let len = values.len();
        let row: [f32; N] = values.try_into().map_err(|_| LineError {
            line: i + 1,
            message: format!("expected {N} numbers, found {len}"),
        })?;
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn rows_of_three() {
        let text = "1 2 3\n\n  4.5\t-1e2 0  \n# comment\n7 8 9";
        let rows = parse_float_rows::<3>(text).unwrap();

        assert_eq!(
            rows,
            vec![[1.0, 2.0, 3.0], [4.5, -100.0, 0.0], [7.0, 8.0, 9.0]]
        );
    }

    #[test]
    fn wrong_count_reports_line() {
        let text = "1 2 3\n1 2\n";
        let err = parse_float_rows::<3>(text).unwrap_err();

        assert_eq!(err.line, 2);
    }

    #[test]
    fn garbage_reports_line() {
        let text = "0.5\n0.25\nabc\n";
        let err = parse_float_rows::<1>(text).unwrap_err();

        assert_eq!(err.line, 3);
    }

    #[test]
    fn empty_text() {
        let rows = parse_float_rows::<9>("").unwrap();
        assert!(rows.is_empty());
    }
}
