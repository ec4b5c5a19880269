mod commands;
mod error;

pub use commands::build_command;
pub use error::BuildError;
