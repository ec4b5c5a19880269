use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use inquire::validator::Validation;
use inquire::{Confirm, CustomType, Select, Text};
use std::fmt::Display;

pub struct InquireDriver;

/// Message for a value outside `[min, max]`, `None` when it is inside.
fn out_of_bounds<T: PartialOrd + Display + Copy>(
    x: T,
    min: Option<T>,
    max: Option<T>,
) -> Option<String> {
    match (min, max) {
        (Some(lo), Some(hi)) if x < lo || x > hi => Some(format!("Must be between {lo} and {hi}")),
        (Some(lo), None) if x < lo => Some(format!("Must be ≥ {lo}")),
        (None, Some(hi)) if x > hi => Some(format!("Must be ≤ {hi}")),
        _ => None,
    }
}

fn ask_bounded<T>(title: &str, help: &str, default: T, min: Option<T>, max: Option<T>) -> Result<T>
where
    T: Clone + Copy + PartialOrd + Display + std::str::FromStr + Send + Sync + 'static,
{
    let q = CustomType::<T>::new(title)
        .with_default(default)
        .with_help_message(help)
        .with_validator(move |x: &T| {
            Ok(match out_of_bounds(*x, min, max) {
                Some(msg) => Validation::Invalid(msg.into()),
                None => Validation::Valid,
            })
        });
    Ok(q.prompt()?)
}

impl PromptDriver for InquireDriver {
    fn choose(&self, prompt: &str, help: Option<&str>, options: &[String]) -> Result<usize> {
        let mut select = Select::new(prompt, options.to_vec());
        if let Some(help) = help {
            select = select.with_help_message(help);
        }
        Ok(select.raw_prompt()?.index)
    }

    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String> {
        Ok(Text::new(title)
            .with_initial_value(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        ask_bounded(title, help, default, min, max)
    }

    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        ask_bounded(title, help, default, min, max)
    }
}
