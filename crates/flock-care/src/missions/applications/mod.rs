//! Member-facing mission trip applications: intake validation, track assignment, review, and
//! the HTTP routes exposing them.

pub mod domain;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ReviewDecision, TrackSource, TripApplicant, TripApplicationId, TripApplicationStatus,
    TripApplicationSubmission,
};
pub use intake::IntakeViolation;
pub use repository::{
    CareNotification, NotificationError, NotificationPublisher, RepositoryError,
    TripApplicationRecord, TripApplicationRepository, TripApplicationStatusView,
};
pub use router::application_router;
pub use service::{ApplicationServiceError, TripApplicationService};
