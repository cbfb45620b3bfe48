//! Top-level scaffolding workflow
//!
//! `CollectingInputs -> PreparingDirectory -> MaterializingFiles ->
//! PatchingManifest -> ReportingDone`, ending in `Done` or `Aborted`.

use crate::error::ScaffoldError;
use crate::flow::{CreateArgs, InteractionFlow, SessionAnswers};
use crate::fs;
use crate::next_steps::NextSteps;
use crate::product::ProductConfig;
use crate::templates::{Catalog, PackageManifest, TemplateProvider};
use crate::ui::Ui;
use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CollectingInputs,
    PreparingDirectory,
    MaterializingFiles,
    PatchingManifest,
    ReportingDone,
    Done,
    Aborted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Stage::CollectingInputs => "collecting project details",
            Stage::PreparingDirectory => "preparing the target directory",
            Stage::MaterializingFiles => "writing template files",
            Stage::PatchingManifest => "updating package.json",
            Stage::ReportingDone => "reporting next steps",
            Stage::Done => "done",
            Stage::Aborted => "aborted",
        };
        write!(f, "{}", text)
    }
}

/// What a finished project looks like
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub template_id: String,
    pub package_name: String,
    pub next_steps: NextSteps,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done(ScaffoldReport),
    /// Cancelled by the user before anything was written
    Aborted(String),
}

impl Outcome {
    /// Terminal stage this outcome corresponds to
    pub fn stage(&self) -> Stage {
        match self {
            Outcome::Done(_) => Stage::Done,
            Outcome::Aborted(_) => Stage::Aborted,
        }
    }
}

/// Ties the interaction flow, directory preparation and a template provider together
pub struct Scaffolder<'a, C: ProductConfig, T: TemplateProvider> {
    config: &'a C,
    catalog: &'a Catalog,
    provider: &'a T,
    cwd: PathBuf,
}

impl<'a, C: ProductConfig, T: TemplateProvider> Scaffolder<'a, C, T> {
    pub fn new(config: &'a C, catalog: &'a Catalog, provider: &'a T, cwd: PathBuf) -> Self {
        Self {
            config,
            catalog,
            provider,
            cwd,
        }
    }

    pub async fn run(&self, args: &CreateArgs, ui: &mut impl Ui) -> Result<Outcome> {
        let flow =
            InteractionFlow::new(self.catalog, &self.cwd, self.config.default_project_name());
        let answers = match flow.run(args, ui) {
            Ok(answers) => answers,
            Err(err) if ScaffoldError::is_cancelled(&err) => {
                return Ok(Outcome::Aborted(err.to_string()))
            }
            Err(err) => return Err(err.context(stage_failed(Stage::CollectingInputs))),
        };

        let root = answers.target_path(&self.cwd);
        prepare_directory(&answers, &root).context(stage_failed(Stage::PreparingDirectory))?;

        let template_id = answers
            .template_id()
            .context("No template selected")?
            .to_string();
        ui.info(&format!("Scaffolding project in {}...", root.display()))?;
        let manifest = self
            .materialize(&template_id, &root, ui)
            .await
            .context(stage_failed(Stage::MaterializingFiles))?;

        let package_name = answers.package_name(&self.cwd);
        patch_manifest(manifest, &package_name, &root)
            .context(stage_failed(Stage::PatchingManifest))?;

        let user_agent = std::env::var(self.config.user_agent_env()).ok();
        let next_steps = NextSteps::new(
            &root,
            &self.cwd,
            user_agent.as_deref(),
            self.config.default_package_manager(),
        );

        Ok(Outcome::Done(ScaffoldReport {
            root,
            template_id,
            package_name,
            next_steps,
        }))
    }

    async fn materialize(
        &self,
        template_id: &str,
        root: &Path,
        ui: &mut impl Ui,
    ) -> Result<PackageManifest> {
        let labels = self.provider.labels();
        ui.task_started(labels.start)?;
        match self.provider.materialize(template_id, root).await {
            Ok(manifest) => {
                ui.task_finished(labels.success, true)?;
                Ok(manifest)
            }
            Err(err) => {
                ui.task_finished(labels.failure, false)?;
                Err(err)
            }
        }
    }
}

fn stage_failed(stage: Stage) -> String {
    format!("Failed while {}", stage)
}

/// Empty the target if overwriting, create it if missing, otherwise leave it
fn prepare_directory(answers: &SessionAnswers, root: &Path) -> Result<()> {
    if answers.overwrite == Some(true) {
        fs::empty_dir(root)
    } else if !root.exists() {
        std::fs::create_dir_all(root)
            .with_context(|| format!("Failed to create directory: {}", root.display()))
    } else {
        Ok(())
    }
}

fn patch_manifest(mut manifest: PackageManifest, package_name: &str, root: &Path) -> Result<()> {
    manifest.set_name(package_name);
    manifest.write_to(root)
}
