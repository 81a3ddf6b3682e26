mod parser;

use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::domain::MemberProfile;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingField {
        row: usize,
        column: &'static str,
    },
    InvalidDate {
        row: usize,
        column: &'static str,
        value: String,
    },
    InvalidCount {
        row: usize,
        column: &'static str,
        value: String,
    },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read member export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid member CSV data: {}", err),
            RosterImportError::MissingField { row, column } => {
                write!(f, "row {}: missing required column '{}'", row, column)
            }
            RosterImportError::InvalidDate { row, column, value } => write!(
                f,
                "row {}: '{}' in column '{}' is not a YYYY-MM-DD date",
                row, value, column
            ),
            RosterImportError::InvalidCount { row, column, value } => write!(
                f,
                "row {}: '{}' in column '{}' is not a non-negative count",
                row, value, column
            ),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::MissingField { .. }
            | RosterImportError::InvalidDate { .. }
            | RosterImportError::InvalidCount { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads member snapshots from a CSV export of the members table.
pub struct MemberRosterImporter;

impl MemberRosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<MemberProfile>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<MemberProfile>, RosterImportError> {
        let members = parser::parse_members(reader)?;
        debug!(count = members.len(), "imported member roster");
        Ok(members)
    }
}
