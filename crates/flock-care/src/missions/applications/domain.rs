use serde::{Deserialize, Serialize};

use crate::care::domain::MemberId;
use crate::missions::tracks::ServiceTrack;

/// Identifier wrapper for submitted trip applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TripApplicationId(pub String);

/// Form payload from the member-facing application page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripApplicationSubmission {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub preferred_track: Option<ServiceTrack>,
    #[serde(default)]
    pub member_id: Option<MemberId>,
}

/// Validated applicant details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripApplicant {
    pub application_id: TripApplicationId,
    pub full_name: String,
    pub email: String,
    pub occupation: Option<String>,
    pub preferred_track: Option<ServiceTrack>,
    pub member_id: Option<MemberId>,
}

impl TripApplicant {
    pub fn first_name(&self) -> &str {
        self.full_name.split_whitespace().next().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripApplicationStatus {
    Submitted,
    Accepted,
    Waitlisted,
    Declined,
}

impl TripApplicationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TripApplicationStatus::Submitted => "submitted",
            TripApplicationStatus::Accepted => "accepted",
            TripApplicationStatus::Waitlisted => "waitlisted",
            TripApplicationStatus::Declined => "declined",
        }
    }

    /// Accepted and declined applications are final.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            TripApplicationStatus::Accepted | TripApplicationStatus::Declined
        )
    }
}

/// How the assigned track was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackSource {
    Preferred,
    Recommended,
    Unassigned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Accept,
    Waitlist,
    Decline,
}

impl ReviewDecision {
    pub fn status(&self) -> TripApplicationStatus {
        match self {
            ReviewDecision::Accept => TripApplicationStatus::Accepted,
            ReviewDecision::Waitlist => TripApplicationStatus::Waitlisted,
            ReviewDecision::Decline => TripApplicationStatus::Declined,
        }
    }
}
