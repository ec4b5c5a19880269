mod action_choice;
mod schema;
mod ui_choice;

pub use action_choice::*;
pub use schema::*;
pub use ui_choice::UIChoice;
