use chrono::NaiveDate;
use tracing::debug;

use shared_models::DoctorRecord;
use shared_utils::clock::{normalize_interval, weekday_name};

use crate::models::{AvailabilityViolation, DoctorLookup, ViolationKind};
use crate::services::roster::DoctorRoster;

/// Outcome of an availability check on a doctor reference.
#[derive(Debug, Clone, Copy)]
pub enum AvailabilityCheck<'a> {
    /// The referenced doctor works on that day and time.
    Available(&'a DoctorRecord),
    /// The reference did not resolve to a roster entry, so no availability
    /// constraint applies.
    Unconstrained,
}

/// Checks a booking window against a doctor's weekdays and working slots.
///
/// The booking must sit entirely inside one configured slot; overlapping a
/// slot is not enough. Slots with a missing or unreadable endpoint never
/// match, and neither does an unreadable booking window.
pub fn check_doctor_availability(
    doctor: &DoctorRecord,
    date: NaiveDate,
    start: &str,
    end: &str,
) -> Result<(), AvailabilityViolation> {
    let weekday = weekday_name(date);

    let violation = |kind| AvailabilityViolation {
        kind,
        doctor_name: doctor.name.clone(),
        date,
        weekday: weekday.to_string(),
        requested: format!("{}-{}", start, end),
        slots: doctor.time_slots.clone(),
    };

    if !doctor.works_on(weekday) {
        debug!("Doctor {} does not work on {}", doctor.booking_key(), weekday);
        return Err(violation(ViolationKind::UnavailableDay));
    }

    let requested = normalize_interval(start, end);
    let fits = requested.is_some_and(|requested| {
        doctor.time_slots.iter().any(|slot| {
            slot.endpoints()
                .and_then(|(from, to)| normalize_interval(from, to))
                .is_some_and(|window| window.contains(&requested))
        })
    });

    if !fits {
        debug!(
            "Requested {}-{} outside working slots of doctor {}",
            start,
            end,
            doctor.booking_key()
        );
        return Err(violation(ViolationKind::TimeMismatch));
    }

    Ok(())
}

/// Resolves `key` and checks availability of the doctor it names.
///
/// A reference that does not resolve is not an error: the booking proceeds
/// as if the doctor had no availability constraint.
pub fn check_reference<'a>(
    roster: &'a DoctorRoster,
    key: &str,
    date: NaiveDate,
    start: &str,
    end: &str,
) -> Result<AvailabilityCheck<'a>, AvailabilityViolation> {
    match roster.resolve(key) {
        DoctorLookup::Found(doctor) => {
            check_doctor_availability(doctor, date, start, end)?;
            Ok(AvailabilityCheck::Available(doctor))
        }
        DoctorLookup::Unresolved => {
            debug!("Doctor reference '{}' not in roster, skipping availability check", key);
            Ok(AvailabilityCheck::Unconstrained)
        }
    }
}
