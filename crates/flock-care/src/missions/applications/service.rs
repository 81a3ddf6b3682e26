use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{
    ReviewDecision, TrackSource, TripApplicationId, TripApplicationStatus,
    TripApplicationSubmission,
};
use super::intake::{applicant_from_submission, IntakeViolation};
use super::repository::{
    CareNotification, NotificationPublisher, RepositoryError,
    TripApplicationRecord, TripApplicationRepository,
};
use crate::missions::tracks::{personalized_invitation, recommend_track};

/// Service composing intake validation, track assignment, storage, and notifications.
pub struct TripApplicationService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> TripApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    TripApplicationId(format!("trip-{id:06}"))
}

impl<R, N> TripApplicationService<R, N>
where
    R: TripApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Validate and store a submission, assigning the preferred or recommended track.
    pub fn submit(
        &self,
        submission: TripApplicationSubmission,
    ) -> Result<TripApplicationRecord, ApplicationServiceError> {
        let mut applicant = applicant_from_submission(submission)?;
        applicant.application_id = next_application_id();

        let (assigned_track, track_source) = match applicant.preferred_track {
            Some(track) => (Some(track), TrackSource::Preferred),
            None => match recommend_track(applicant.occupation.as_deref()) {
                Some(track) => (Some(track), TrackSource::Recommended),
                None => (None, TrackSource::Unassigned),
            },
        };

        let invitation = personalized_invitation(applicant.first_name(), assigned_track);
        let record = TripApplicationRecord {
            applicant,
            status: TripApplicationStatus::Submitted,
            assigned_track,
            track_source,
            invitation,
        };

        let stored = self.repository.insert(record)?;
        info!(
            application_id = %stored.applicant.application_id.0,
            track = stored.assigned_track.map(|track| track.code()).unwrap_or("none"),
            "trip application received"
        );

        self.notify(&stored, "trip_application_received");
        Ok(stored)
    }

    /// Record a reviewer decision. Accepted and declined applications cannot be reviewed again.
    pub fn review(
        &self,
        application_id: &TripApplicationId,
        decision: ReviewDecision,
    ) -> Result<TripApplicationRecord, ApplicationServiceError> {
        let mut record = self.get(application_id)?;

        if record.status.is_final() {
            warn!(
                application_id = %application_id.0,
                status = record.status.label(),
                "review attempted on a decided application"
            );
            return Err(ApplicationServiceError::AlreadyDecided(
                record.status.label(),
            ));
        }

        record.status = decision.status();
        self.repository.update(record.clone())?;
        info!(
            application_id = %application_id.0,
            status = record.status.label(),
            "trip application reviewed"
        );

        if record.status == TripApplicationStatus::Accepted {
            self.notify(&record, "trip_application_accepted");
        }

        Ok(record)
    }

    pub fn get(
        &self,
        application_id: &TripApplicationId,
    ) -> Result<TripApplicationRecord, ApplicationServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Delivery failures are logged; the stored record stays the source of truth.
    fn notify(&self, record: &TripApplicationRecord, template: &str) {
        let mut details = BTreeMap::new();
        details.insert("status".to_string(), record.status.label().to_string());
        if let Some(track) = record.assigned_track {
            details.insert("track".to_string(), track.code().to_string());
        }

        let notification = CareNotification {
            template: template.to_string(),
            application_id: record.applicant.application_id.clone(),
            recipient: record.applicant.email.clone(),
            details,
        };

        if let Err(err) = self.notifier.publish(notification) {
            warn!(
                application_id = %record.applicant.application_id.0,
                template,
                error = %err,
                "care notification not delivered"
            );
        }
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("application already {0}")]
    AlreadyDecided(&'static str),
}
