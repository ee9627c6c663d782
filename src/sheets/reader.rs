use std::fs;
use std::path::Path;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{char, line_ending, none_of};
use nom::combinator::{cut, eof, value};
use nom::multi::{many0, separated_list1};
use nom::sequence::{preceded, terminated};
use nom::{IResult, Parser};
use tracing::debug;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{Row, Table};

/// Reads delimited text (CSV by default) into a [`Table`].
///
/// The first record is the header. Quoted cells may contain the delimiter,
/// line breaks and doubled quotes. Blank lines are skipped.
#[derive(Debug, Clone, Copy)]
pub struct TableReader {
    pub delimiter: char,
}

impl Default for TableReader {
    fn default() -> Self {
        TableReader { delimiter: ',' }
    }
}

impl TableReader {
    pub fn new(delimiter: char) -> Self {
        TableReader { delimiter }
    }

    pub fn read(&self, path: &Path) -> Result<Table> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::Io, format!("could not read {:?}: {}", path, e))
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let table = self.parse(&name, &text).map_err(|e| {
            Error::new(e.kind, format!("could not read CSV from file {:?}: {}", path, e.context))
        })?;
        debug!(table = %table.name, headers = table.headers.len(), rows = table.len(), "read sheet");
        Ok(table)
    }

    pub fn parse(&self, name: &str, text: &str) -> Result<Table> {
        let mut records = parse_records(text, self.delimiter)?.into_iter();

        let headers: Vec<String> = match records.next() {
            Some(header) => header.into_iter().map(|h| h.trim().to_string()).collect(),
            None => return Ok(Table::new(name, Vec::new())),
        };

        let mut table = Table::new(name, headers);
        for (line, record) in records.enumerate() {
            if record.len() > table.headers.len() {
                return Err(Error::new(
                    ErrorKind::Parse,
                    format!(
                        "record {} has {} cells but the header has {}",
                        line + 1,
                        record.len(),
                        table.headers.len()
                    ),
                ));
            }

            // Short records are kept with the cells they have; only surplus
            // cells are rejected, unlike a strict field-count check.
            let row: Row = table.headers.iter().cloned().zip(record).collect();
            table.push_row(row);
        }

        Ok(table)
    }
}

fn quoted_field(input: &str) -> IResult<&str, String> {
    let escaped_quote = value('"', tag("\"\""));
    // Once a quote opens, the cell must close it
    preceded(char('"'), cut(terminated(many0(alt((escaped_quote, none_of("\"")))), char('"'))))
        .map(|chars: Vec<char>| chars.into_iter().collect())
        .parse(input)
}

fn record(input: &str, delimiter: char) -> IResult<&str, Vec<String>> {
    let bare_field = take_while(move |c: char| c != delimiter && c != '\n' && c != '\r')
        .map(|s: &str| s.to_string());
    separated_list1(char(delimiter), alt((quoted_field, bare_field))).parse(input)
}

/// Split delimited text into records of raw cell values.
pub fn parse_records(text: &str, delimiter: char) -> Result<Vec<Vec<String>>> {
    // Spreadsheet exports often start with a byte order mark
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = Vec::new();
    let mut input = text;

    while !input.is_empty() {
        let malformed = |at: &str| {
            let line = text[..text.len() - at.len()].matches('\n').count() + 1;
            Error::new(ErrorKind::Parse, format!("malformed record at line {}", line))
        };

        let (rest, fields) = record(input, delimiter).map_err(|_| malformed(input))?;
        let ending: IResult<&str, &str> = alt((line_ending, eof)).parse(rest);
        let (rest, _) = ending.map_err(|_| malformed(rest))?;

        let blank = fields.len() == 1 && fields[0].is_empty();
        if !blank {
            records.push(fields);
        }
        input = rest;
    }

    Ok(records)
}
