use tracing::debug;

use doctor_cell::models::DoctorRole;
use doctor_cell::services::{check_reference, AvailabilityCheck, DoctorRoster};
use shared_models::{ScheduleDraft, ScheduleRecord};

use crate::models::{Rejection, ScheduleCandidate};
use crate::services::conflict::find_conflict;

fn check_role(
    roster: &DoctorRoster,
    role: DoctorRole,
    key: &str,
    draft: &ScheduleDraft,
) -> Result<(), Rejection> {
    let outcome = check_reference(roster, key, draft.date, &draft.start_time, &draft.end_time)
        .map_err(|violation| Rejection::unavailable(role, violation))?;

    if let AvailabilityCheck::Available(doctor) = outcome {
        debug!("{} {} available for {}", role, doctor.booking_key(), draft.time_range());
    }
    Ok(())
}

/// Decides whether a candidate booking may be committed.
///
/// Checks run in a fixed order and the first failure wins: required
/// fields, surgeon availability, anesthesiologist availability (when one is
/// named), then resource conflicts against `same_date`. On success the
/// trimmed draft is returned ready to store.
pub fn validate_candidate(
    candidate: &ScheduleCandidate,
    roster: &DoctorRoster,
    same_date: &[ScheduleRecord],
    editing_id: Option<&str>,
) -> Result<ScheduleDraft, Rejection> {
    let draft = candidate.to_draft()?;

    check_role(roster, DoctorRole::Surgeon, &draft.surgeon_id, &draft)?;

    if !draft.anesthesiologist_id.is_empty() {
        check_role(roster, DoctorRole::Anesthesiologist, &draft.anesthesiologist_id, &draft)?;
    }

    if let Some(conflict) = find_conflict(&draft, same_date, roster, editing_id) {
        return Err(Rejection::conflict(conflict));
    }

    debug!("Booking {} on {} passed validation", draft.time_range(), draft.date);
    Ok(draft)
}
