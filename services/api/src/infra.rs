use chrono::NaiveDate;
use flock_care::care::MemberProfile;
use flock_care::missions::applications::{
    CareNotification, NotificationError, NotificationPublisher, RepositoryError,
    TripApplicationId, TripApplicationRecord, TripApplicationRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    /// Roster preloaded from `APP_ROSTER_PATH`; empty when none is configured.
    pub(crate) roster: Arc<Vec<MemberProfile>>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryTripApplicationRepository {
    records: Arc<Mutex<BTreeMap<TripApplicationId, TripApplicationRecord>>>,
}

impl TripApplicationRepository for InMemoryTripApplicationRepository {
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
        if guard.contains_key(&record.applicant.application_id) {
            guard.insert(record.applicant.application_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(
        &self,
        id: &TripApplicationId,
    ) -> Result<Option<TripApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Records notifications and logs them in place of the e-mail campaign sender.
#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationPublisher {
    events: Arc<Mutex<Vec<CareNotification>>>,
}

impl NotificationPublisher for InMemoryNotificationPublisher {
    fn publish(&self, notification: CareNotification) -> Result<(), NotificationError> {
        info!(
            template = %notification.template,
            application_id = %notification.application_id.0,
            "notification queued"
        );
        let mut guard = self.events.lock().expect("notification mutex poisoned");
        guard.push(notification);
        Ok(())
    }
}

impl InMemoryNotificationPublisher {
    pub(crate) fn events(&self) -> Vec<CareNotification> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
