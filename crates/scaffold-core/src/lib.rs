//! Scaffold Core - Shared library for project scaffolding CLIs
//!
//! This library asks a few questions (project name, framework, variant),
//! materializes a project directory from a template and reports how to get
//! started. It is used by two binaries that differ only in where templates
//! come from: bundled `template-<id>` directories, or repositories downloaded
//! from GitHub.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - name validation, directory operations,
//!   template catalog, template providers, package.json rewriting
//! - **Layer 2: Workflow Orchestration** - `InteractionFlow` and `Scaffolder`,
//!   driven through the `Ui` trait so any front-end (or a test) can answer
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffold_core::{CreateArgs, LocalTemplates, ProductConfig, Scaffolder};
//!
//! let catalog = MyConfig.catalog()?;
//! let provider = LocalTemplates::new("templates".into());
//! let scaffolder = Scaffolder::new(&MyConfig, &catalog, &provider, std::env::current_dir()?);
//! let outcome = scaffolder.run(&CreateArgs::default(), &mut my_ui).await?;
//! ```

pub mod error;
pub mod flow;
pub mod fs;
pub mod naming;
pub mod next_steps;
pub mod product;
pub mod scaffold;
pub mod templates;
pub mod ui;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::ScaffoldError;
pub use flow::{CreateArgs, InteractionFlow, SessionAnswers};
pub use next_steps::NextSteps;
pub use product::ProductConfig;
pub use scaffold::{Outcome, ScaffoldReport, Scaffolder, Stage};
pub use templates::{
    Catalog, Framework, LocalTemplates, PackageManifest, RemoteTemplates, TemplateProvider,
    Variant,
};
pub use ui::{Choice, Ui};

#[cfg(feature = "tui")]
pub use tui::run;
