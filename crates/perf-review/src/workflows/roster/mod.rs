//! CSV roster import for seeding employee records.
//!
//! Expected headers: `Name,Email,Phone,Position,Department,Location,Status,Date Hired`.
//! `Status` and `Date Hired` may be omitted or left blank; a blank status means
//! `Active`. The remaining columns are required.

mod parser;

use crate::workflows::review::EmployeeDraft;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidStatus { line: usize, value: String },
    InvalidDate { line: usize, value: String },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::InvalidStatus { line, value } => write!(
                f,
                "line {}: unknown employee status '{}' (expected Active, On Leave or Terminated)",
                line, value
            ),
            RosterImportError::InvalidDate { line, value } => {
                write!(f, "line {}: '{}' is not a YYYY-MM-DD date", line, value)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::InvalidStatus { .. } | RosterImportError::InvalidDate { .. } => None,
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

/// Six-person roster used by the demo command and import tests.
pub const SAMPLE_ROSTER: &str = include_str!("../../../sample_roster.csv");

pub struct EmployeeRosterImporter;

impl EmployeeRosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<EmployeeDraft>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<EmployeeDraft>, RosterImportError> {
        parser::parse_roster(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::review::EmployeeStatus;
    use chrono::NaiveDate;
    use std::io::Cursor;

    #[test]
    fn parses_rows_with_defaults() {
        let csv = "Name,Email,Phone,Position,Department,Location,Status,Date Hired\n\
                   Ana Cruz, ana@example.com ,0917-555-0101,Teller,Branch Ops,Makati,,2022-03-14\n\
                   Ben Reyes,ben@example.com,0917-555-0102,Analyst,Finance,Cebu,On Leave,\n";

        let drafts = EmployeeRosterImporter::from_reader(Cursor::new(csv)).expect("roster parses");

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].email, "ana@example.com");
        assert_eq!(drafts[0].status, EmployeeStatus::Active);
        assert_eq!(
            drafts[0].date_hired,
            Some(NaiveDate::from_ymd_opt(2022, 3, 14).expect("valid date"))
        );
        assert_eq!(drafts[1].status, EmployeeStatus::OnLeave);
        assert_eq!(drafts[1].date_hired, None);
    }

    #[test]
    fn status_and_hire_date_columns_may_be_absent() {
        let csv = "Name,Email,Phone,Position,Department,Location\n\
                   Cara Lim,cara@example.com,0917-555-0103,Engineer,IT,Pasig\n";

        let drafts = EmployeeRosterImporter::from_reader(Cursor::new(csv)).expect("roster parses");

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].phone, "0917-555-0103");
        assert_eq!(drafts[0].location, "Pasig");
        assert_eq!(drafts[0].status, EmployeeStatus::Active);
        assert_eq!(drafts[0].date_hired, None);
    }

    #[test]
    fn missing_contact_columns_are_rejected() {
        let csv = "Name,Email,Position,Department\nCara Lim,cara@example.com,Engineer,IT\n";

        let err = EmployeeRosterImporter::from_reader(Cursor::new(csv)).expect_err("phone required");

        assert!(matches!(err, RosterImportError::Csv(_)));
        assert!(err.to_string().contains("Phone"), "{err}");
    }

    #[test]
    fn unknown_status_reports_line() {
        let csv = "Name,Email,Phone,Position,Department,Location,Status\n\
                   Ana Cruz,ana@example.com,0917,Teller,Branch Ops,Makati,Active\n\
                   Ben Reyes,ben@example.com,0918,Analyst,Finance,Cebu,Retired\n";

        let err = EmployeeRosterImporter::from_reader(Cursor::new(csv)).expect_err("status rejected");

        match err {
            RosterImportError::InvalidStatus { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "Retired");
            }
            other => panic!("expected invalid status, got {other:?}"),
        }
    }

    #[test]
    fn malformed_hire_date_is_rejected() {
        let csv = "Name,Email,Phone,Position,Department,Location,Date Hired\n\
                   Ana Cruz,ana@example.com,0917,Teller,Ops,Makati,14/03/2022\n";

        let err = EmployeeRosterImporter::from_reader(Cursor::new(csv)).expect_err("date rejected");

        assert!(matches!(err, RosterImportError::InvalidDate { line: 2, .. }));
    }
}
