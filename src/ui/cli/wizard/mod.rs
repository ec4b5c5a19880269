mod wizard;

pub use wizard::{prompt_choice, prompt_tiers, run_interactive};
