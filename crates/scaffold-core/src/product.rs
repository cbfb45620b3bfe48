//! Product configuration trait for CLI binaries
//!
//! This trait defines what each binary (local templates, remote templates)
//! supplies to configure the shared scaffolding flow.

use crate::templates::Catalog;
use anyhow::Result;

/// Configuration trait for different CLI products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - The framework catalog it offers
/// - Defaults used when the user does not answer
/// - Where the invoking package manager is read from
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the binary and HTTP user agent)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// CLI description shown in --help
    fn cli_description(&self) -> &'static str {
        "Scaffold a new project from a template"
    }

    /// Framework catalog as a JSON array
    fn catalog_json(&self) -> &'static str;

    /// Parse the embedded catalog
    fn catalog(&self) -> Result<Catalog> {
        Catalog::from_json(self.catalog_json())
    }

    /// Directory name used when the user gives no project name
    fn default_project_name(&self) -> &'static str {
        "vite-project"
    }

    /// Package manager assumed when none can be detected
    fn default_package_manager(&self) -> &'static str {
        "npm"
    }

    /// Environment variable holding the package manager's user agent
    fn user_agent_env(&self) -> &'static str {
        "npm_config_user_agent"
    }

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
