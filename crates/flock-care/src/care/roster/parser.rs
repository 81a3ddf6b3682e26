use super::RosterImportError;
use crate::care::domain::{MemberId, MemberProfile, MembershipTier, SpiritualActivity};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

// Header occupies line 1 of the export.
const FIRST_DATA_ROW: usize = 2;

pub(crate) fn parse_members<R: Read>(reader: R) -> Result<Vec<MemberProfile>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut members = Vec::new();

    for (index, record) in csv_reader.deserialize::<MemberRow>().enumerate() {
        let row = record?;
        members.push(row.into_profile(index + FIRST_DATA_ROW)?);
    }

    Ok(members)
}

#[derive(Debug, Deserialize)]
struct MemberRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    first_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    last_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    occupation: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    anniversary_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    membership_start: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tier: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    devotionals_read: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    journal_entries: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    prayers_submitted: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    primary_gift: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    current_season: Option<String>,
}

impl MemberRow {
    fn into_profile(self, row: usize) -> Result<MemberProfile, RosterImportError> {
        let id = self.id.ok_or(RosterImportError::MissingField { row, column: "id" })?;

        Ok(MemberProfile {
            id: MemberId(id),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            occupation: self.occupation,
            date_of_birth: date_column(row, "date_of_birth", self.date_of_birth)?,
            anniversary_date: date_column(row, "anniversary_date", self.anniversary_date)?,
            membership_start: date_column(row, "membership_start", self.membership_start)?,
            tier: self
                .tier
                .as_deref()
                .map(MembershipTier::parse_lenient)
                .unwrap_or_default(),
            activity: SpiritualActivity {
                devotionals_read: count_column(row, "devotionals_read", self.devotionals_read)?,
                journal_entries: count_column(row, "journal_entries", self.journal_entries)?,
                prayers_submitted: count_column(row, "prayers_submitted", self.prayers_submitted)?,
                primary_gift: self.primary_gift,
                current_season: self.current_season,
            },
        })
    }
}

fn date_column(
    row: usize,
    column: &'static str,
    raw: Option<String>,
) -> Result<Option<NaiveDate>, RosterImportError> {
    match raw {
        None => Ok(None),
        Some(value) => match parse_date(&value) {
            Some(date) => Ok(Some(date)),
            None => Err(RosterImportError::InvalidDate { row, column, value }),
        },
    }
}

fn count_column(
    row: usize,
    column: &'static str,
    raw: Option<String>,
) -> Result<Option<u32>, RosterImportError> {
    match raw {
        None => Ok(None),
        Some(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|_| RosterImportError::InvalidCount { row, column, value }),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}
