use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::engagement::EngagementInputs;

/// Identifier wrapper for member rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(pub String);

/// Membership level gating content access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipTier {
    #[default]
    Free,
    Partner,
    Covenant,
}

impl MembershipTier {
    /// Lenient parse used by roster imports; unknown values fall back to `Free`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "partner" => Self::Partner,
            "covenant" => Self::Covenant,
            _ => Self::Free,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MembershipTier::Free => "Free",
            MembershipTier::Partner => "Partner",
            MembershipTier::Covenant => "Covenant",
        }
    }
}

/// Activity counters maintained by the devotional, journal, and prayer features.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiritualActivity {
    pub devotionals_read: Option<u32>,
    pub journal_entries: Option<u32>,
    pub prayers_submitted: Option<u32>,
    pub primary_gift: Option<String>,
    pub current_season: Option<String>,
}

/// Read-only snapshot of a member row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub anniversary_date: Option<NaiveDate>,
    #[serde(default)]
    pub membership_start: Option<NaiveDate>,
    #[serde(default)]
    pub tier: MembershipTier,
    #[serde(default)]
    pub activity: SpiritualActivity,
}

impl MemberProfile {
    pub fn full_name(&self) -> String {
        match (self.first_name.trim(), self.last_name.trim()) {
            ("", "") => self.email.clone(),
            (first, "") => first.to_string(),
            ("", last) => last.to_string(),
            (first, last) => format!("{first} {last}"),
        }
    }

    pub fn engagement_inputs(&self) -> EngagementInputs {
        EngagementInputs::from(&self.activity)
    }
}
