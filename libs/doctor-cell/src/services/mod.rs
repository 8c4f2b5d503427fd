pub mod availability;
pub mod roster;
pub mod theatre;

pub use availability::{check_doctor_availability, check_reference, AvailabilityCheck};
pub use roster::DoctorRoster;
pub use theatre::suggest_theatres;
