pub mod phase;
pub mod session;

pub use phase::Phase;
pub use session::{PendingSubmission, Session, SessionError};
