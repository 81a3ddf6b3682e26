use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::care::domain::MemberId;
use crate::missions::applications::domain::{TripApplicationId, TripApplicationSubmission};
use crate::missions::applications::repository::{
    CareNotification, NotificationError, NotificationPublisher, RepositoryError,
    TripApplicationRecord, TripApplicationRepository,
};
use crate::missions::applications::{application_router, TripApplicationService};

pub(super) fn submission() -> TripApplicationSubmission {
    TripApplicationSubmission {
        full_name: "Grace  Hopper".to_string(),
        email: " Grace@Example.org ".to_string(),
        occupation: Some("Registered Nurse".to_string()),
        preferred_track: None,
        member_id: Some(MemberId("m-1".to_string())),
    }
}

pub(super) fn retired_submission() -> TripApplicationSubmission {
    let mut submission = submission();
    submission.full_name = "Walt Porter".to_string();
    submission.email = "walt@example.org".to_string();
    submission.occupation = Some("Retired".to_string());
    submission
}

pub(super) fn build_service() -> (
    TripApplicationService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = TripApplicationService::new(repository.clone(), notifier.clone());
    (service, repository, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<TripApplicationId, TripApplicationRecord>>>,
}

impl MemoryRepository {
    pub(super) fn stored(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl TripApplicationRepository for MemoryRepository {
    fn insert(
        &self,
        record: TripApplicationRecord,
    ) -> Result<TripApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.applicant.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.applicant.application_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: TripApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.applicant.application_id.clone(), record);
        Ok(())
    }

    fn fetch(
        &self,
        id: &TripApplicationId,
    ) -> Result<Option<TripApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<CareNotification>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<CareNotification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifier {
    fn publish(&self, notification: CareNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct OfflineNotifier;

impl NotificationPublisher for OfflineNotifier {
    fn publish(&self, _notification: CareNotification) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("smtp relay offline".to_string()))
    }
}

pub(super) struct ConflictRepository;

impl TripApplicationRepository for ConflictRepository {
    fn insert(
        &self,
        _record: TripApplicationRecord,
    ) -> Result<TripApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: TripApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(
        &self,
        _id: &TripApplicationId,
    ) -> Result<Option<TripApplicationRecord>, RepositoryError> {
        Ok(None)
    }
}

pub(super) struct UnavailableRepository;

impl TripApplicationRepository for UnavailableRepository {
    fn insert(
        &self,
        _record: TripApplicationRecord,
    ) -> Result<TripApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: TripApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(
        &self,
        _id: &TripApplicationId,
    ) -> Result<Option<TripApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: TripApplicationService<MemoryRepository, MemoryNotifier>,
) -> axum::Router {
    application_router(Arc::new(service))
}
