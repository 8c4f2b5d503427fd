use tracing::debug;

use crate::models::{Accepted, ScheduleCandidate, ScheduleError};
use crate::services::booking::SchedulingService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Next submission creates a new booking.
    Idle,
    /// Next submission updates this booking.
    Editing { schedule_id: String },
    /// Last submission was stored under this id.
    Committed { schedule_id: String },
}

/// Tracks whether the scheduling form is creating or editing a booking.
///
/// A rejected or failed submission leaves the state untouched so the form
/// can be corrected and resubmitted.
pub struct EditSession<'a> {
    service: &'a SchedulingService,
    state: SessionState,
}

impl<'a> EditSession<'a> {
    pub fn new(service: &'a SchedulingService) -> Self {
        Self {
            service,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn editing_id(&self) -> Option<&str> {
        match &self.state {
            SessionState::Editing { schedule_id } => Some(schedule_id),
            _ => None,
        }
    }

    /// Loads a booking for editing and returns it as form contents.
    pub async fn begin_edit(&mut self, schedule_id: &str) -> Result<ScheduleCandidate, ScheduleError> {
        let record = self.service.get_schedule(schedule_id).await?;
        debug!("Editing schedule {}", record.id);

        let candidate = ScheduleCandidate::from_record(&record);
        self.state = SessionState::Editing {
            schedule_id: record.id,
        };
        Ok(candidate)
    }

    pub async fn submit(&mut self, candidate: &ScheduleCandidate) -> Result<Accepted, ScheduleError> {
        let editing_id = self.editing_id().map(str::to_string);
        let accepted = self
            .service
            .validate_and_commit(candidate, editing_id.as_deref())
            .await?;

        self.state = SessionState::Committed {
            schedule_id: accepted.id.clone(),
        };
        Ok(accepted)
    }

    /// Abandons an edit; the next submission creates a new booking.
    pub fn cancel(&mut self) {
        self.state = SessionState::Idle;
    }
}
