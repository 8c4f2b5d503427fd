pub mod doctor;
pub mod error;
pub mod schedule;

pub use doctor::{DoctorRecord, TimeSlot};
pub use schedule::{ScheduleDraft, ScheduleRecord};
