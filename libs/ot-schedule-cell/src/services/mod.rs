pub mod booking;
pub mod conflict;
pub mod session;
pub mod validator;

pub use booking::SchedulingService;
pub use conflict::find_conflict;
pub use session::{EditSession, SessionState};
pub use validator::validate_candidate;
