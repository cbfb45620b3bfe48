//! Templates bundled as `template-<id>` directories on disk

use super::manifest::{PackageManifest, MANIFEST_FILE};
use super::{target_file_name, template_dir_name, TaskLabels, TemplateProvider};
use crate::error::ScaffoldError;
use crate::fs;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Provider that copies templates from a local directory
#[derive(Debug, Clone)]
pub struct LocalTemplates {
    root: PathBuf,
}

impl LocalTemplates {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Pick the template root directory
    ///
    /// Precedence: explicit path, then the `env_var` environment variable,
    /// then the directory of the running executable (or its `templates/`
    /// subdirectory) if it holds templates, then `bundled`.
    pub fn resolve_root(explicit: Option<PathBuf>, env_var: &str, bundled: &Path) -> PathBuf {
        if let Some(path) = explicit {
            return path;
        }

        if let Some(path) = std::env::var_os(env_var).filter(|v| !v.is_empty()) {
            return PathBuf::from(path);
        }

        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        if let Some(dir) = exe_dir {
            for candidate in [dir.clone(), dir.join("templates")] {
                if has_templates(&candidate) {
                    return candidate;
                }
            }
        }

        bundled.to_path_buf()
    }

    /// Directory holding the files of `template_id`
    pub fn template_path(&self, template_id: &str) -> PathBuf {
        self.root.join(template_dir_name(template_id))
    }

    /// Template identifiers present on disk, sorted
    pub fn available(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read {}", self.root.display()))?
        {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.strip_prefix("template-"))
            {
                ids.push(id.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// Whether `dir` contains at least one `template-*` directory
fn has_templates(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries.flatten().any(|entry| {
                entry.path().is_dir() && entry.file_name().to_string_lossy().starts_with("template-")
            })
        })
        .unwrap_or(false)
}

impl TemplateProvider for LocalTemplates {
    fn describe(&self) -> String {
        format!("local templates in {}", self.root.display())
    }

    fn labels(&self) -> TaskLabels {
        TaskLabels {
            start: "Copying template...",
            success: "Template copied",
            failure: "Copy failed",
        }
    }

    async fn materialize(&self, template_id: &str, target: &Path) -> Result<PackageManifest> {
        let template_path = self.template_path(template_id);
        if !template_path.is_dir() {
            return Err(ScaffoldError::TemplateNotFound(template_id.to_string()))
                .with_context(|| format!("No template directory at {}", template_path.display()));
        }

        for entry in std::fs::read_dir(&template_path)
            .with_context(|| format!("Failed to read {}", template_path.display()))?
        {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name == MANIFEST_FILE {
                continue;
            }

            fs::copy(&entry.path(), &target.join(target_file_name(&name)))?;
        }

        PackageManifest::read_from(&template_path)
            .with_context(|| format!("Template '{}' has no usable {}", template_id, MANIFEST_FILE))
    }
}
