use once_cell::sync::Lazy;
use regex::Regex;

/// Line separators, tried in this order at every position.
static LINE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new("\r\n|\n\r|\n").expect("line separator pattern is valid"));

pub(crate) const FIELD_DELIMITER: char = '\t';

/// Splits `text` into lines on `\r\n`, `\n\r` or `\n`, dropping empty lines.
///
/// A lone `\r` is not a separator and stays part of its line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    LINE_SEPARATOR.split(text).filter(|line| !line.is_empty())
}

/// How a data row is cut into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldSplitter {
    /// Every tab is a delimiter.
    #[default]
    Plain,
    /// A tab is a delimiter only when an even number of `"` follow it on the
    /// line, so tabs inside a quoted span are kept. Quotes are left in place.
    QuoteAware,
}

impl FieldSplitter {
    pub(crate) fn new(split_in_quotes: bool) -> Self {
        if split_in_quotes {
            Self::QuoteAware
        } else {
            Self::Plain
        }
    }

    /// Splits a single line into its fields. Empty fields are kept.
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            FieldSplitter::Plain => line.split(FIELD_DELIMITER).collect(),
            FieldSplitter::QuoteAware => split_outside_quotes(line),
        }
    }
}

fn split_outside_quotes(line: &str) -> Vec<&str> {
    let total_quotes = line.matches('"').count();

    let mut fields = vec![];
    let mut quotes_seen = 0;
    let mut field_start = 0;

    for (idx, chr) in line.char_indices() {
        match chr {
            '"' => quotes_seen += 1,
            FIELD_DELIMITER if (total_quotes - quotes_seen) % 2 == 0 => {
                fields.push(&line[field_start..idx]);
                field_start = idx + FIELD_DELIMITER.len_utf8();
            }
            _ => {}
        }
    }

    fields.push(&line[field_start..]);
    fields
}
