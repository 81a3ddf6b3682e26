use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{TrackSource, TripApplicant, TripApplicationId, TripApplicationStatus};
use crate::missions::tracks::{recommendation_code, ServiceTrack};

/// Stored application: applicant details, review status, and track assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripApplicationRecord {
    pub applicant: TripApplicant,
    pub status: TripApplicationStatus,
    pub assigned_track: Option<ServiceTrack>,
    pub track_source: TrackSource,
    pub invitation: String,
}

impl TripApplicationRecord {
    pub fn status_view(&self) -> TripApplicationStatusView {
        TripApplicationStatusView {
            application_id: self.applicant.application_id.clone(),
            status: self.status.label(),
            assigned_track: recommendation_code(self.assigned_track),
            track_label: self.assigned_track.map(|track| track.label()),
            track_source: self.track_source,
            invitation: self.invitation.clone(),
        }
    }
}

/// Storage abstraction so the service can run against the hosted database or memory.
pub trait TripApplicationRepository: Send + Sync {
    fn insert(&self, record: TripApplicationRecord)
        -> Result<TripApplicationRecord, RepositoryError>;
    fn update(&self, record: TripApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch(
        &self,
        id: &TripApplicationId,
    ) -> Result<Option<TripApplicationRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for e-mail/SMS campaign delivery.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: CareNotification) -> Result<(), NotificationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareNotification {
    pub template: String,
    pub application_id: TripApplicationId,
    pub recipient: String,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Public representation of an application's status.
#[derive(Debug, Clone, Serialize)]
pub struct TripApplicationStatusView {
    pub application_id: TripApplicationId,
    pub status: &'static str,
    pub assigned_track: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_label: Option<&'static str>,
    pub track_source: TrackSource,
    pub invitation: String,
}
