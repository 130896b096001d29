use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::workflows::review::{EmployeeDraft, EmployeeStatus};

use super::RosterImportError;

pub(crate) fn parse_roster<R: Read>(reader: R) -> Result<Vec<EmployeeDraft>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut drafts = Vec::new();

    for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = record?;
        // header occupies line 1
        let line = index + 2;
        drafts.push(row.into_draft(line)?);
    }

    Ok(drafts)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Phone")]
    phone: String,
    #[serde(rename = "Position")]
    position: String,
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(
        rename = "Date Hired",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    date_hired: Option<String>,
}

impl RosterRow {
    fn into_draft(self, line: usize) -> Result<EmployeeDraft, RosterImportError> {
        let status = match self.status.as_deref() {
            None => EmployeeStatus::Active,
            Some(raw) => EmployeeStatus::parse(raw).ok_or_else(|| RosterImportError::InvalidStatus {
                line,
                value: raw.to_string(),
            })?,
        };

        let date_hired = match self.date_hired.as_deref() {
            None => None,
            Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                RosterImportError::InvalidDate {
                    line,
                    value: raw.to_string(),
                }
            })?),
        };

        Ok(EmployeeDraft {
            name: self.name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            department: self.department,
            location: self.location,
            status,
            date_hired,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
