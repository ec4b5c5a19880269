use crate::ui::cli::drivers::PromptDriver;
use anyhow::{Result, anyhow, bail};
use inquire::InquireError;
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Menu entry whose label starts with this text.
    Pick(&'static str),
    Text(String),
    Bool(bool),
    Int(u64),
    Float(f64),
    /// Accept whatever default the prompt offers.
    Default,
}

/// Replays queued answers instead of reading a terminal. Once the script runs
/// out every prompt fails as if the user had pressed Esc.
#[derive(Default)]
pub struct ScriptedDriver {
    answers: RefCell<VecDeque<Answer>>,
    pub shown: RefCell<Vec<String>>,
    pub complaints: RefCell<Vec<String>>,
    pub titles: RefCell<Vec<String>>,
}

impl ScriptedDriver {
    pub fn new<I: IntoIterator<Item = Answer>>(answers: I) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, title: &str) -> Result<Answer> {
        self.titles.borrow_mut().push(title.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!(InquireError::OperationCanceled))
    }
}

fn strip_styling(label: &str) -> &str {
    label.split("\x1b").next().unwrap_or(label).trim()
}

impl PromptDriver for ScriptedDriver {
    fn choose(&self, prompt: &str, _help: Option<&str>, options: &[String]) -> Result<usize> {
        match self.next(prompt)? {
            Answer::Pick(label) => options
                .iter()
                .position(|o| strip_styling(o).starts_with(label))
                .ok_or_else(|| anyhow!("no menu entry starting with {label:?}")),
            Answer::Default => Ok(0),
            other => bail!("{prompt}: expected a menu pick, got {other:?}"),
        }
    }

    fn ask_bool(&self, title: &str, _help: &str, default: bool) -> Result<bool> {
        match self.next(title)? {
            Answer::Bool(b) => Ok(b),
            Answer::Default => Ok(default),
            other => bail!("{title}: expected a bool, got {other:?}"),
        }
    }

    fn ask_string(&self, title: &str, _help: &str, default: &str) -> Result<String> {
        match self.next(title)? {
            Answer::Text(s) => Ok(s),
            Answer::Default => Ok(default.to_string()),
            other => bail!("{title}: expected text, got {other:?}"),
        }
    }

    fn ask_u64(
        &self,
        title: &str,
        _help: &str,
        default: u64,
        _min: Option<u64>,
        _max: Option<u64>,
    ) -> Result<u64> {
        match self.next(title)? {
            Answer::Int(n) => Ok(n),
            Answer::Default => Ok(default),
            other => bail!("{title}: expected an integer, got {other:?}"),
        }
    }

    fn ask_f64(
        &self,
        title: &str,
        _help: &str,
        default: f64,
        _min: Option<f64>,
        _max: Option<f64>,
    ) -> Result<f64> {
        match self.next(title)? {
            Answer::Float(x) => Ok(x),
            Answer::Default => Ok(default),
            other => bail!("{title}: expected a number, got {other:?}"),
        }
    }

    fn show(&self, text: &str) {
        self.shown.borrow_mut().push(text.to_string());
    }

    fn complain(&self, message: &str) {
        self.complaints.borrow_mut().push(message.to_string());
    }
}
