use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info};

use doctor_cell::services::DoctorRoster;
use shared_database::{ScheduleFilter, SharedStore, StoreError};
use shared_models::{ScheduleDraft, ScheduleRecord};
use shared_utils::clock::parse_clock_time;

use crate::models::{Accepted, ScheduleCandidate, ScheduleError, ScheduleQuery, ScheduleView};
use crate::services::validator::validate_candidate;

/// One async lock per booking date.
///
/// Validation reads a snapshot of the date's bookings and the commit writes
/// back to the store; holding the date's lock across both keeps two
/// overlapping submissions from both passing the conflict check. This only
/// serializes callers within this process.
#[derive(Default)]
struct DateLocks {
    inner: Mutex<HashMap<NaiveDate, Arc<AsyncMutex<()>>>>,
}

impl DateLocks {
    fn for_date(&self, date: NaiveDate) -> Arc<AsyncMutex<()>> {
        let mut locks = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        // Drop locks nobody is waiting on
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks.entry(date).or_default().clone()
    }
}

fn schedule_not_found(id: &str, err: StoreError) -> ScheduleError {
    match err {
        StoreError::NotFound(_) => ScheduleError::NotFound(id.to_string()),
        other => ScheduleError::Store(other),
    }
}

pub struct SchedulingService {
    store: SharedStore,
    locks: DateLocks,
}

impl SchedulingService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            locks: DateLocks::default(),
        }
    }

    /// Roster and the bookings on `date`, fetched together.
    async fn snapshot(&self, date: NaiveDate) -> Result<(DoctorRoster, Vec<ScheduleRecord>), StoreError> {
        let filter = ScheduleFilter::on(date);
        futures::try_join!(
            DoctorRoster::load(self.store.as_ref()),
            self.store.list_schedules(&filter)
        )
    }

    async fn validate(
        &self,
        candidate: &ScheduleCandidate,
        date: NaiveDate,
        editing_id: Option<&str>,
    ) -> Result<ScheduleDraft, ScheduleError> {
        let (roster, same_date) = self.snapshot(date).await?;
        debug!("Validating against {} bookings on {}", same_date.len(), date);

        validate_candidate(candidate, &roster, &same_date, editing_id).map_err(|rejection| {
            info!("Booking on {} rejected: {}", date, rejection.reason);
            ScheduleError::Rejected(rejection)
        })
    }

    /// Validates without committing. With `editing_id` the booking must
    /// exist and is excluded from conflict checks, as on commit.
    pub async fn check(
        &self,
        candidate: &ScheduleCandidate,
        editing_id: Option<&str>,
    ) -> Result<ScheduleDraft, ScheduleError> {
        let date = candidate.to_draft()?.date;
        if let Some(id) = editing_id {
            self.get_schedule(id).await?;
        }
        self.validate(candidate, date, editing_id).await
    }

    /// Validates a booking and, when it passes, stores it.
    ///
    /// With `editing_id` the existing booking is updated in place: it is
    /// excluded from conflict checks and keeps its id and creation time.
    /// Missing fields are rejected before the store is touched. A store
    /// failure at any step aborts without committing.
    pub async fn validate_and_commit(
        &self,
        candidate: &ScheduleCandidate,
        editing_id: Option<&str>,
    ) -> Result<Accepted, ScheduleError> {
        let date = candidate.to_draft()?.date;

        let lock = self.locks.for_date(date);
        let _guard = lock.lock().await;

        let existing = match editing_id {
            Some(id) => Some(self.get_schedule(id).await?),
            None => None,
        };

        let mut draft = self.validate(candidate, date, editing_id).await?;

        match existing {
            Some(existing) => {
                draft.created_at = existing.created_at;
                self.store
                    .update_schedule(&existing.id, &draft)
                    .await
                    .map_err(|err| schedule_not_found(&existing.id, err))?;

                info!("Schedule {} updated for {} {}", existing.id, draft.date, draft.time_range());
                Ok(Accepted {
                    id: existing.id,
                    updated: true,
                })
            }
            None => {
                draft.created_at.get_or_insert_with(Utc::now);
                let id = self.store.create_schedule(&draft).await?;

                info!("Schedule {} created for {} {}", id, draft.date, draft.time_range());
                Ok(Accepted { id, updated: false })
            }
        }
    }

    pub async fn get_schedule(&self, id: &str) -> Result<ScheduleRecord, ScheduleError> {
        debug!("Fetching schedule: {}", id);

        self.store
            .get_schedule(id)
            .await?
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))
    }

    pub async fn delete_schedule(&self, id: &str) -> Result<(), ScheduleError> {
        let record = self.get_schedule(id).await?;

        let lock = self.locks.for_date(record.date);
        let _guard = lock.lock().await;

        self.store
            .delete_schedule(id)
            .await
            .map_err(|err| schedule_not_found(id, err))?;

        info!("Schedule {} deleted", id);
        Ok(())
    }

    /// Bookings with doctor names resolved, newest date first and by start
    /// time within a date.
    pub async fn list_schedules(&self, query: &ScheduleQuery) -> Result<Vec<ScheduleView>, ScheduleError> {
        debug!("Listing schedules with filters: {:?}", query);

        let filter = ScheduleFilter { date: query.date };
        let (roster, records) = futures::try_join!(
            DoctorRoster::load(self.store.as_ref()),
            self.store.list_schedules(&filter)
        )?;

        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut views: Vec<ScheduleView> = records
            .into_iter()
            .map(|record| ScheduleView {
                surgeon_name: roster.name_of(&record.surgeon_id).map(str::to_string),
                anesthesiologist_name: roster.name_of(&record.anesthesiologist_id).map(str::to_string),
                record,
            })
            .filter(|view| match &search {
                Some(needle) => {
                    let surgeon = view.surgeon_name.as_deref().unwrap_or(&view.record.surgeon_id);
                    [view.record.patient_id.as_str(), view.record.surgery_type.as_str(), surgeon]
                        .iter()
                        .any(|field| field.to_lowercase().contains(needle.as_str()))
                }
                None => true,
            })
            .collect();

        let start_key = |view: &ScheduleView| parse_clock_time(&view.record.start_time).unwrap_or(u32::MAX);
        views.sort_by(|a, b| {
            b.record
                .date
                .cmp(&a.record.date)
                .then_with(|| start_key(a).cmp(&start_key(b)))
        });

        debug!("{} schedules matched", views.len());
        Ok(views)
    }
}
