use tracing::{debug, warn};

use doctor_cell::services::DoctorRoster;
use shared_models::{ScheduleDraft, ScheduleRecord};
use shared_utils::clock::intervals_overlap;

use crate::models::{Conflict, ConflictKind};

/// The value a booking holds on the given resource axis, if any.
fn held_resource(kind: ConflictKind, draft: &ScheduleDraft) -> Option<&str> {
    let value = match kind {
        ConflictKind::Patient => draft.patient_id.as_str(),
        ConflictKind::Anesthesiologist => draft.anesthesiologist_id.as_str(),
        ConflictKind::Surgeon => draft.surgeon_id.as_str(),
        ConflictKind::OperationTheatre => draft.ot_name.as_str(),
    };
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

fn holds(kind: ConflictKind, record: &ScheduleRecord, resource: &str, roster: &DoctorRoster) -> bool {
    match kind {
        ConflictKind::Patient => record.patient_id.trim() == resource,
        ConflictKind::Anesthesiologist => roster.same_doctor(&record.anesthesiologist_id, resource),
        ConflictKind::Surgeon => roster.same_doctor(&record.surgeon_id, resource),
        ConflictKind::OperationTheatre => record.ot_name.trim() == resource,
    }
}

/// Finds the first existing booking that collides with `candidate`.
///
/// Only bookings on the candidate's date are compared and `exclude_id` (the
/// booking being edited) is skipped. Axes are checked in
/// [`ConflictKind::PRIORITY`] order so a patient clash is reported before a
/// theatre clash on the same record. Doctor references are compared through
/// the roster, so an external id and a storage id for the same doctor clash.
pub fn find_conflict(
    candidate: &ScheduleDraft,
    existing: &[ScheduleRecord],
    roster: &DoctorRoster,
    exclude_id: Option<&str>,
) -> Option<Conflict> {
    let same_date: Vec<&ScheduleRecord> = existing
        .iter()
        .filter(|record| record.date == candidate.date)
        .filter(|record| exclude_id != Some(record.id.as_str()))
        .collect();

    debug!(
        "Checking {} bookings on {} for conflicts with {}",
        same_date.len(),
        candidate.date,
        candidate.time_range()
    );

    for kind in ConflictKind::PRIORITY {
        let Some(resource) = held_resource(kind, candidate) else {
            continue;
        };

        let clash = same_date.iter().find(|record| {
            holds(kind, record, resource, roster)
                && intervals_overlap(
                    &candidate.start_time,
                    &candidate.end_time,
                    &record.start_time,
                    &record.end_time,
                )
        });

        if let Some(record) = clash {
            warn!(
                "{:?} conflict on '{}' with booking {} ({}-{})",
                kind, resource, record.id, record.start_time, record.end_time
            );
            return Some(Conflict::new(kind, resource, record));
        }
    }

    None
}
