//! Template catalog, providers and manifest handling
//!
//! This module provides:
//! - The framework/variant catalog (`Catalog`)
//! - The `TemplateProvider` trait with a local (bundled directories) and a
//!   remote (GitHub archive) implementation
//! - package.json parsing and rewriting (`PackageManifest`)

pub mod catalog;
pub mod local;
pub mod manifest;
pub mod remote;

use anyhow::Result;
use std::path::Path;

pub use catalog::{Catalog, Framework, Variant};
pub use local::LocalTemplates;
pub use manifest::{PackageManifest, MANIFEST_FILE};
pub use remote::RemoteTemplates;

/// Top-level template files stored under a different name, written under their real one
const RENAMED_FILES: &[(&str, &str)] = &[("_gitignore", ".gitignore")];

/// Name a top-level template entry should have in the generated project
pub fn target_file_name(name: &str) -> &str {
    RENAMED_FILES
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| *to)
        .unwrap_or(name)
}

/// Template directory (or repository) name for a template identifier
pub fn template_dir_name(template_id: &str) -> String {
    format!("template-{}", template_id)
}

/// Spinner messages shown while a provider works
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLabels {
    pub start: &'static str,
    pub success: &'static str,
    pub failure: &'static str,
}

/// Supplies the files of a template
///
/// Implementations write every template file except `package.json` into
/// `target` and hand the parsed manifest back, so the caller can rewrite its
/// name before writing it. `target` already exists when this is called.
#[allow(async_fn_in_trait)]
pub trait TemplateProvider {
    /// Short description of where templates come from
    fn describe(&self) -> String;

    fn labels(&self) -> TaskLabels;

    /// Materialize `template_id` into `target`
    async fn materialize(&self, template_id: &str, target: &Path) -> Result<PackageManifest>;
}
