//! create-fazba - Project scaffolding from bundled templates

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser};
use scaffold_core::tui::{install_terminal_guards, restore_cursor};
use scaffold_core::{CreateArgs, LocalTemplates, ProductConfig};
use std::path::{Path, PathBuf};

/// Environment variable overriding the template directory
const TEMPLATE_DIR_ENV: &str = "CREATE_FAZBA_TEMPLATE_DIR";

/// Templates shipped in the repository, used when nothing else is found
const BUNDLED_TEMPLATES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates");

/// fazba product configuration (local templates)
#[derive(Clone)]
pub struct FazbaConfig;

impl ProductConfig for FazbaConfig {
    fn name(&self) -> &'static str {
        "create-fazba"
    }

    fn display_name(&self) -> &'static str {
        "create-fazba"
    }

    fn cli_description(&self) -> &'static str {
        "Scaffold a fazba project from the bundled templates"
    }

    fn catalog_json(&self) -> &'static str {
        include_str!("../catalog.json")
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-fazba")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub create: CreateArgs,

    /// Directory containing template-<name> folders (for development use)
    #[arg(long = "template-dir", value_name = "PATH")]
    pub template_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_terminal_guards();

    let config = FazbaConfig;
    let matches = Cli::command()
        .about(config.cli_description())
        .get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let catalog = config.catalog()?;
    let root = LocalTemplates::resolve_root(
        cli.template_dir,
        TEMPLATE_DIR_ENV,
        Path::new(BUNDLED_TEMPLATES),
    );
    let provider = LocalTemplates::new(root);

    let result = scaffold_core::run(&config, &catalog, &provider, cli.create).await;

    restore_cursor();

    result
}
