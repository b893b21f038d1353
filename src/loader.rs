use std::{collections::HashMap, time::Instant};

use tracing::{error, info, warn};

use crate::{
    provider::{ResourceError, ResourceProvider},
    split::{split_lines, FieldSplitter, FIELD_DELIMITER},
};

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Options for a [Loader].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    split_in_quotes: bool,
}

impl LoaderOptions {
    /// Keep tabs found inside `"..."` as part of the field instead of splitting on them.
    /// Off by default. Only data rows are affected; the header is always split on every tab.
    pub fn split_in_quotes(mut self, enabled: bool) -> Self {
        self.split_in_quotes = enabled;
        self
    }
}

/// Loads one language column of a tab separated localization file into a table.
///
/// The file's first line names the columns. The first column of every other line
/// is the key, and the column whose header contains the requested language code
/// holds the text for that key.
#[derive(Debug, Clone)]
pub struct Loader<P> {
    provider: P,
    options: LoaderOptions,
    splitter: FieldSplitter,
}

impl<P: ResourceProvider> Loader<P> {
    /// Creates a loader with default options.
    pub fn new(provider: P) -> Self {
        Self::with_options(provider, LoaderOptions::default())
    }

    pub fn with_options(provider: P, options: LoaderOptions) -> Self {
        Self {
            provider,
            splitter: FieldSplitter::new(options.split_in_quotes),
            options,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn options(&self) -> LoaderOptions {
        self.options
    }

    /// Fetches `resource_name` and fills `table` with the column for `language`.
    ///
    /// Duplicate keys and malformed rows are logged, not returned. See [Loader::parse_into].
    ///
    /// ## Errors
    /// - the provider could not produce the resource
    /// - the resource has no lines at all
    /// - no header contains `language`
    pub async fn load(
        &self,
        language: &str,
        resource_name: &str,
        table: &mut HashMap<String, String>,
    ) -> Result<(), LoadError> {
        let started = Instant::now();

        let text = self.provider.fetch(resource_name).await?;
        let summary = self.parse_into(language, resource_name, &text, table)?;

        info!(
            source = resource_name,
            language,
            inserted = summary.inserted,
            elapsed = ?started.elapsed(),
            "parsing finished"
        );

        Ok(())
    }

    /// Parses `text` and fills `table` with the column for `language`.
    /// `source_name` is only used for logging and errors.
    ///
    /// The header match is a substring match: `"EN"` selects a column named `"EN_US"`.
    /// The first matching column wins.
    ///
    /// Rows are then handled in order:
    /// - an empty key skips the row
    /// - a key already in `table` (from this file or from before) is logged and skipped,
    ///   so the first occurrence wins
    /// - a row too short to reach the language column is logged and **ends the parse**.
    ///   Rows before it stay in `table`, rows after it are never read, even if well formed.
    ///   This is on purpose: a short row usually means the column layout of the rest of
    ///   the file can't be trusted either.
    ///
    /// ## Errors
    /// - `text` has no non-empty line
    /// - no header contains `language`. `table` is untouched in that case.
    pub fn parse_into(
        &self,
        language: &str,
        source_name: &str,
        text: &str,
        table: &mut HashMap<String, String>,
    ) -> Result<ParseSummary, LoadError> {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);

        let mut lines = split_lines(text);

        let Some(header) = lines.next() else {
            return Err(LoadError::MissingHeader {
                source_name: source_name.to_owned(),
            });
        };

        let target_column =
            find_column(header, language).ok_or_else(|| LoadError::HeaderNotFound {
                language: language.to_owned(),
                source_name: source_name.to_owned(),
            })?;

        let mut summary = ParseSummary {
            target_column,
            ..ParseSummary::default()
        };

        // the header is line 1
        for (line_number, line) in (2..).zip(lines) {
            let fields = self.splitter.split(line);

            let key = fields[0];
            if key.is_empty() {
                summary.skipped_empty += 1;
                continue;
            }

            if table.contains_key(key) {
                warn!(
                    source = source_name,
                    key,
                    line = line_number,
                    "duplicate key, keeping the first"
                );
                summary.duplicates.push(key.to_owned());
                continue;
            }

            let Some(value) = fields.get(target_column) else {
                error!(
                    source = source_name,
                    line = line_number,
                    column = target_column,
                    found = fields.len(),
                    "row is missing the language column, ignoring the rest of the file"
                );
                summary.aborted_at = Some(line_number);
                break;
            };

            table.insert(key.to_owned(), (*value).to_owned());
            summary.inserted += 1;
        }

        Ok(summary)
    }
}

/// Index of the first header column whose name contains `language`.
fn find_column(header: &str, language: &str) -> Option<usize> {
    header
        .split(FIELD_DELIMITER)
        .position(|column| column.contains(language))
}

/// What a single parse did to the table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseSummary {
    /// The column picked for the language.
    pub target_column: usize,
    /// Number of rows inserted.
    pub inserted: usize,
    /// Number of rows skipped for having an empty key.
    pub skipped_empty: usize,
    /// Keys which were skipped because they were already in the table.
    pub duplicates: Vec<String>,
    /// The line (1-based, counting only non-empty lines) of the malformed row
    /// that stopped the parse, if any.
    pub aborted_at: Option<usize>,
}

/// Failures which stop a load before any row is read. Problems with single rows
/// are logged instead.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Resource(#[from] ResourceError),
    /// The text is empty or holds nothing but line separators. Any text with at
    /// least one non-empty line gets past this and is checked for the language
    /// with [LoadError::HeaderNotFound].
    #[error("`{source_name}` has no header line")]
    MissingHeader { source_name: String },
    #[error("no header in `{source_name}` contains language `{language}`")]
    HeaderNotFound {
        language: String,
        source_name: String,
    },
}
