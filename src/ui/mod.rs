pub mod cli;
pub mod report;
pub mod session;
pub mod types;

pub use session::{Command, Outcome, Session, SessionError};
