//! The question/answer session that fills in whatever the CLI left out
//!
//! Questions are asked in a fixed order. Right before each one, its
//! precondition is evaluated against the answers collected so far and decides
//! whether (and how) it is shown.

use crate::error::ScaffoldError;
use crate::fs;
use crate::naming::{
    format_target_dir, is_valid_package_name, project_name, to_valid_package_name,
};
use crate::templates::{Catalog, Framework};
use crate::ui::{Choice, Ui};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Inputs taken from the command line
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CreateArgs {
    /// Project directory to create (`.` for the current directory)
    #[arg(value_name = "DIRECTORY")]
    pub target_dir: Option<String>,

    /// Template to use, skipping the framework and variant prompts
    #[arg(short, long)]
    pub template: Option<String>,
}

/// Everything learned about the project, filled in question by question
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionAnswers {
    /// Target directory relative to the working directory, `None` until known
    pub target_dir: Option<String>,

    /// Answer to the overwrite question, `None` if it was not asked
    pub overwrite: Option<bool>,

    /// Explicit package name, `None` if the project name was already valid
    pub package_name: Option<String>,

    pub framework: Option<Framework>,

    pub variant: Option<String>,

    /// Raw `--template` value
    pub template: Option<String>,
}

impl SessionAnswers {
    pub fn target_dir(&self) -> &str {
        self.target_dir.as_deref().unwrap_or(".")
    }

    /// Project name: the target directory, or the current directory's name for `.`
    pub fn project_name(&self, cwd: &Path) -> String {
        project_name(self.target_dir(), cwd)
    }

    /// Name written into package.json
    pub fn package_name(&self, cwd: &Path) -> String {
        self.package_name
            .clone()
            .unwrap_or_else(|| self.project_name(cwd))
    }

    /// Template to materialize: variant name, else framework name, else `--template`
    pub fn template_id(&self) -> Option<&str> {
        self.variant
            .as_deref()
            .or(self.framework.as_ref().map(|f| f.name.as_str()))
            .or(self.template.as_deref())
    }

    /// Absolute path of the project directory
    pub fn target_path(&self, cwd: &Path) -> PathBuf {
        match self.target_dir() {
            "." => cwd.to_path_buf(),
            dir => cwd.join(dir),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    ProjectName,
    Overwrite,
    OverwriteGuard,
    PackageName,
    Framework,
    Variant,
}

/// Every question, in the order it is considered
pub const QUESTIONS: [Question; 6] = [
    Question::ProjectName,
    Question::Overwrite,
    Question::OverwriteGuard,
    Question::PackageName,
    Question::Framework,
    Question::Variant,
];

/// How a question is presented, as decided by its precondition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ask {
    Skip,
    Input,
    Confirm,
    Select,
}

const PACKAGE_NAME_ERROR: &str = "Invalid package.json name";

fn validate_package_name(name: &str) -> std::result::Result<(), &'static str> {
    if is_valid_package_name(name) {
        Ok(())
    } else {
        Err(PACKAGE_NAME_ERROR)
    }
}

pub struct InteractionFlow<'a> {
    catalog: &'a Catalog,
    cwd: &'a Path,
    default_project_name: &'a str,
}

impl<'a> InteractionFlow<'a> {
    pub fn new(catalog: &'a Catalog, cwd: &'a Path, default_project_name: &'a str) -> Self {
        Self {
            catalog,
            cwd,
            default_project_name,
        }
    }

    /// Precondition of `question` given the answers so far
    ///
    /// Fails with `ScaffoldError::Cancelled` at the overwrite guard when the
    /// user refused to overwrite.
    pub fn ask(&self, question: Question, answers: &SessionAnswers) -> Result<Ask> {
        let ask = match question {
            Question::ProjectName => {
                if answers.target_dir.is_some() {
                    Ask::Skip
                } else {
                    Ask::Input
                }
            }
            Question::Overwrite => {
                let target = answers.target_path(self.cwd);
                if !target.exists() || fs::is_empty(&target)? {
                    Ask::Skip
                } else {
                    Ask::Confirm
                }
            }
            Question::OverwriteGuard => {
                if answers.overwrite == Some(false) {
                    return Err(ScaffoldError::Cancelled.into());
                }
                Ask::Skip
            }
            Question::PackageName => {
                if is_valid_package_name(&answers.project_name(self.cwd)) {
                    Ask::Skip
                } else {
                    Ask::Input
                }
            }
            Question::Framework => match answers.template.as_deref() {
                Some(template) if self.catalog.contains(template) => Ask::Skip,
                _ => Ask::Select,
            },
            Question::Variant => match &answers.framework {
                Some(framework) if framework.has_variants() => Ask::Select,
                _ => Ask::Skip,
            },
        };
        Ok(ask)
    }

    /// Run every question in order and return the collected answers
    pub fn run(&self, args: &CreateArgs, ui: &mut impl Ui) -> Result<SessionAnswers> {
        let mut answers = SessionAnswers {
            target_dir: args.target_dir.as_deref().and_then(format_target_dir),
            template: args.template.clone(),
            ..SessionAnswers::default()
        };

        for question in QUESTIONS {
            if self.ask(question, &answers)? == Ask::Skip {
                continue;
            }
            self.answer(question, &mut answers, ui)?;
        }

        Ok(answers)
    }

    fn answer(
        &self,
        question: Question,
        answers: &mut SessionAnswers,
        ui: &mut impl Ui,
    ) -> Result<()> {
        match question {
            Question::ProjectName => {
                let value = ui.input("Project name:", self.default_project_name, None)?;
                let target_dir = format_target_dir(&value)
                    .unwrap_or_else(|| self.default_project_name.to_string());
                answers.target_dir = Some(target_dir);
            }
            Question::Overwrite => {
                let message = overwrite_message(answers.target_dir());
                answers.overwrite = Some(ui.confirm(&message)?);
            }
            Question::OverwriteGuard => {}
            Question::PackageName => {
                let suggested = to_valid_package_name(&answers.project_name(self.cwd));
                let name = ui.input("Package name:", &suggested, Some(validate_package_name))?;
                answers.package_name = Some(name);
            }
            Question::Framework => {
                let message = framework_message(answers.template.as_deref());
                let choices: Vec<Choice> = self
                    .catalog
                    .frameworks()
                    .iter()
                    .map(|f| Choice::new(f.label().to_string(), ""))
                    .collect();
                let idx = ui.select(&message, &choices)?;
                let framework = self
                    .catalog
                    .frameworks()
                    .get(idx)
                    .cloned()
                    .with_context(|| format!("No framework at position {}", idx))?;
                answers.framework = Some(framework);
            }
            Question::Variant => {
                let Some(framework) = answers.framework.as_ref() else {
                    return Ok(());
                };
                let choices: Vec<Choice> = framework
                    .variants()
                    .iter()
                    .map(|v| {
                        Choice::new(v.label().to_string(), v.display.clone().unwrap_or_default())
                    })
                    .collect();
                let idx = ui.select("Select a variant:", &choices)?;
                let variant = framework
                    .variants()
                    .get(idx)
                    .with_context(|| format!("No variant at position {}", idx))?;
                answers.variant = Some(variant.name.clone());
            }
        }
        Ok(())
    }
}

fn overwrite_message(target_dir: &str) -> String {
    let subject = if target_dir == "." {
        "Current directory".to_string()
    } else {
        format!("Target directory \"{}\"", target_dir)
    };
    format!("{} is not empty. Remove existing files and continue?", subject)
}

fn framework_message(template: Option<&str>) -> String {
    match template {
        Some(template) if !template.is_empty() => format!(
            "\"{}\" isn't a valid template. Please choose from below: ",
            template
        ),
        _ => "Select a framework:".to_string(),
    }
}
