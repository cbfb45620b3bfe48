//! create-fazba-remote - Project scaffolding from templates hosted on GitHub

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser};
use scaffold_core::tui::{install_terminal_guards, restore_cursor};
use scaffold_core::{Catalog, CreateArgs, ProductConfig, RemoteTemplates};
use url::Url;

/// Environment variable overriding the archive host
const DOWNLOAD_URL_ENV: &str = "CREATE_FAZBA_DOWNLOAD_URL";

/// Environment variable pointing at a JSON framework catalog
const CATALOG_URL_ENV: &str = "CREATE_FAZBA_CATALOG_URL";

/// GitHub organization owning the `template-<name>` repositories
const TEMPLATE_ORG: &str = "fazba";

/// Branch whose archive is downloaded
const TEMPLATE_BRANCH: &str = "master";

/// fazba product configuration (remote templates)
#[derive(Clone)]
pub struct FazbaRemoteConfig;

impl ProductConfig for FazbaRemoteConfig {
    fn name(&self) -> &'static str {
        "create-fazba-remote"
    }

    fn display_name(&self) -> &'static str {
        "create-fazba"
    }

    fn cli_description(&self) -> &'static str {
        "Scaffold a fazba project from templates hosted on GitHub"
    }

    fn catalog_json(&self) -> &'static str {
        include_str!("../catalog.json")
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-fazba-remote")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub create: CreateArgs,

    /// URL of a JSON framework catalog to use instead of the built-in one
    #[arg(long = "catalog-url", value_name = "URL", env = CATALOG_URL_ENV)]
    pub catalog_url: Option<Url>,
}

async fn load_catalog(
    config: &FazbaRemoteConfig,
    provider: &RemoteTemplates,
    catalog_url: Option<&Url>,
) -> Result<Catalog> {
    match catalog_url {
        Some(url) => provider
            .fetch_catalog(url)
            .await
            .with_context(|| format!("Failed to load the template catalog from {}", url)),
        None => config.catalog(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    install_terminal_guards();

    let config = FazbaRemoteConfig;
    let matches = Cli::command()
        .about(config.cli_description())
        .get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let provider = RemoteTemplates::from_env(
        DOWNLOAD_URL_ENV,
        TEMPLATE_ORG,
        TEMPLATE_BRANCH,
        config.user_agent(),
    )?;
    let catalog = load_catalog(&config, &provider, cli.catalog_url.as_ref()).await?;

    let result = scaffold_core::run(&config, &catalog, &provider, cli.create).await;

    restore_cursor();

    result
}
