//! Parsing of guest list uploads.
//!
//! Uploads are comma-separated text with a header row. The name column may
//! be called `invite_name` or `name`; `phone` is optional. Headers match
//! case-sensitively. Each data row becomes one [`ImportRow`], in file order,
//! so that the importer can count every row exactly once.

use crate::error::{Result, RsvpError};

const NAME_COLUMNS: [&str; 2] = ["invite_name", "name"];
const PHONE_COLUMN: &str = "phone";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One data row of an upload, classified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportRow {
    /// A row with a usable name.
    Candidate {
        /// Trimmed name
        invite_name: String,
        /// Trimmed phone, if present and non-empty
        phone: Option<String>,
    },
    /// Neither name column has a value.
    MissingName {
        /// 1-based line in the upload
        line: u64,
    },
    /// The reader could not decode the row.
    Malformed {
        /// 1-based line in the upload, when known
        line: Option<u64>,
        /// Decoder message
        reason: String,
    },
}

/// Column positions resolved from the header row.
#[derive(Debug, Default)]
struct Columns {
    names: Vec<usize>,
    phone: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Self {
        let position = |wanted: &str| headers.iter().position(|h| h == wanted);
        Self {
            names: NAME_COLUMNS.iter().filter_map(|c| position(*c)).collect(),
            phone: position(PHONE_COLUMN),
        }
    }

    fn classify(&self, record: &csv::StringRecord) -> ImportRow {
        let field = |idx: usize| record.get(idx).filter(|v| !v.is_empty());

        let name = self.names.iter().find_map(|&idx| field(idx));
        match name {
            Some(invite_name) => ImportRow::Candidate {
                invite_name: invite_name.to_string(),
                phone: self.phone.and_then(field).map(str::to_string),
            },
            None => ImportRow::MissingName {
                line: record.position().map_or(0, csv::Position::line),
            },
        }
    }
}

/// Split an upload into classified rows.
///
/// Blank lines are ignored and every field is trimmed. Rows may have fewer
/// or more fields than the header. A row that cannot be decoded (for
/// example invalid UTF-8) is reported as [`ImportRow::Malformed`] and the
/// following rows are still read.
///
/// # Errors
///
/// Returns `RsvpError::Validation` if the header row itself cannot be read.
pub fn parse_invite_rows(data: &[u8]) -> Result<Vec<ImportRow>> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let columns = Columns::resolve(
        reader
            .headers()
            .map_err(|e| RsvpError::validation(format!("Could not read header row: {e}")))?,
    );

    let rows = reader
        .records()
        .map(|record| match record {
            Ok(record) => columns.classify(&record),
            Err(e) => ImportRow::Malformed {
                line: e.position().map(csv::Position::line),
                reason: e.to_string(),
            },
        })
        .collect();

    Ok(rows)
}
