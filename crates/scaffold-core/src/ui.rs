//! Terminal seam between the scaffolding logic and whatever renders it

use anyhow::Result;

/// Input check: `Ok(())` accepts, `Err(message)` rejects and asks again
pub type Validator = fn(&str) -> std::result::Result<(), &'static str>;

/// One entry of a select prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub hint: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            hint: hint.into(),
        }
    }
}

/// Prompts and progress output used while scaffolding
///
/// Implementations must turn a user abort (Esc / Ctrl+C at a prompt) into
/// `ScaffoldError::Cancelled`.
pub trait Ui {
    /// Free-text question; an empty answer yields `default`
    fn input(&mut self, message: &str, default: &str, validate: Option<Validator>)
        -> Result<String>;

    /// Yes/no question, defaulting to no
    fn confirm(&mut self, message: &str) -> Result<bool>;

    /// Pick one of `choices`, returning its index
    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<usize>;

    fn info(&mut self, message: &str) -> Result<()>;

    fn task_started(&mut self, message: &str) -> Result<()>;

    fn task_finished(&mut self, message: &str, success: bool) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod scripted {
    use super::{Choice, Ui, Validator};
    use crate::error::ScaffoldError;
    use anyhow::Result;
    use std::collections::VecDeque;

    /// Pre-recorded reply to the next prompt
    #[derive(Debug, Clone)]
    pub enum Answer {
        Text(&'static str),
        Confirm(bool),
        Select(usize),
        Interrupt,
    }

    /// `Ui` that replays answers and records every prompt it was shown
    #[derive(Debug, Default)]
    pub struct ScriptedUi {
        answers: VecDeque<Answer>,
        pub prompts: Vec<String>,
        pub rejections: Vec<&'static str>,
        pub infos: Vec<String>,
        pub tasks: Vec<(String, bool)>,
    }

    impl ScriptedUi {
        pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
            Self {
                answers: answers.into_iter().collect(),
                ..Self::default()
            }
        }

        fn next(&mut self, message: &str) -> Result<Answer> {
            self.prompts.push(message.to_string());
            match self.answers.pop_front() {
                Some(Answer::Interrupt) => Err(ScaffoldError::Cancelled.into()),
                Some(answer) => Ok(answer),
                None => panic!("no scripted answer for prompt: {}", message),
            }
        }
    }

    impl Ui for ScriptedUi {
        fn input(
            &mut self,
            message: &str,
            default: &str,
            validate: Option<Validator>,
        ) -> Result<String> {
            loop {
                let value = match self.next(message)? {
                    Answer::Text("") => default.to_string(),
                    Answer::Text(text) => text.to_string(),
                    other => panic!("expected text for {:?}, got {:?}", message, other),
                };
                match validate.map(|check| check(&value)) {
                    Some(Err(rejection)) => self.rejections.push(rejection),
                    _ => return Ok(value),
                }
            }
        }

        fn confirm(&mut self, message: &str) -> Result<bool> {
            match self.next(message)? {
                Answer::Confirm(value) => Ok(value),
                other => panic!("expected confirm for {:?}, got {:?}", message, other),
            }
        }

        fn select(&mut self, message: &str, choices: &[Choice]) -> Result<usize> {
            match self.next(message)? {
                Answer::Select(idx) if idx < choices.len() => Ok(idx),
                other => panic!("bad select answer for {:?}: {:?}", message, other),
            }
        }

        fn info(&mut self, message: &str) -> Result<()> {
            self.infos.push(message.to_string());
            Ok(())
        }

        fn task_started(&mut self, _message: &str) -> Result<()> {
            Ok(())
        }

        fn task_finished(&mut self, message: &str, success: bool) -> Result<()> {
            self.tasks.push((message.to_string(), success));
            Ok(())
        }
    }
}
