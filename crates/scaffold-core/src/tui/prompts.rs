//! Charm-style CLI prompts using cliclack

use crate::error::ScaffoldError;
use crate::flow::CreateArgs;
use crate::product::ProductConfig;
use crate::scaffold::{Outcome, ScaffoldReport, Scaffolder};
use crate::templates::{Catalog, TemplateProvider};
use crate::ui::{Choice, Ui, Validator};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io;

/// Map a cliclack error, turning Esc / Ctrl+C into a cancellation
fn prompt_error(err: io::Error) -> anyhow::Error {
    if err.kind() == io::ErrorKind::Interrupted {
        ScaffoldError::Cancelled.into()
    } else {
        err.into()
    }
}

/// `Ui` backed by cliclack prompts and spinners
#[derive(Default)]
pub struct CliclackUi {
    spinner: Option<cliclack::ProgressBar>,
}

impl Ui for CliclackUi {
    fn input(
        &mut self,
        message: &str,
        default: &str,
        validate: Option<Validator>,
    ) -> Result<String> {
        let mut prompt = cliclack::input(message)
            .placeholder(default)
            .default_input(default);
        if let Some(check) = validate {
            prompt = prompt.validate(move |value: &String| check(value.as_str()));
        }
        prompt.interact().map_err(prompt_error)
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        cliclack::confirm(message)
            .initial_value(false)
            .interact()
            .map_err(prompt_error)
    }

    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<usize> {
        let mut select = cliclack::select(message.to_string());
        for (idx, choice) in choices.iter().enumerate() {
            select = select.item(idx, &choice.label, &choice.hint);
        }
        select.interact().map_err(prompt_error)
    }

    fn info(&mut self, message: &str) -> Result<()> {
        cliclack::log::info(message)?;
        Ok(())
    }

    fn task_started(&mut self, message: &str) -> Result<()> {
        let spinner = cliclack::spinner();
        spinner.start(message);
        self.spinner = Some(spinner);
        Ok(())
    }

    fn task_finished(&mut self, message: &str, success: bool) -> Result<()> {
        if let Some(spinner) = self.spinner.take() {
            if success {
                spinner.stop(message);
            } else {
                spinner.error(message);
            }
        }
        Ok(())
    }
}

/// Run the scaffolder with interactive prompts
pub async fn run<C: ProductConfig, T: TemplateProvider>(
    config: &C,
    catalog: &Catalog,
    provider: &T,
    args: CreateArgs,
) -> Result<()> {
    cliclack::intro(config.display_name())?;
    cliclack::log::info(format!("Using {}", provider.describe()))?;

    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
    let scaffolder = Scaffolder::new(config, catalog, provider, cwd);
    let mut ui = CliclackUi::default();

    match scaffolder.run(&args, &mut ui).await? {
        Outcome::Aborted(message) => {
            cliclack::outro_cancel(format!("{} {}", "✖".red(), message))?;
            Ok(())
        }
        Outcome::Done(report) => print_next_steps(&report),
    }
}

fn print_next_steps(report: &ScaffoldReport) -> Result<()> {
    cliclack::log::success(format!(
        "Created {} from template {}",
        report.package_name.bold(),
        report.template_id.cyan()
    ))?;

    println!();
    println!("  Done. Now run:");
    println!();

    for line in report.next_steps.lines() {
        println!("    {}", line.green());
    }

    println!();
    cliclack::outro("Happy coding!")?;

    Ok(())
}

/// Restore the cursor on panic and exit cleanly on Ctrl+C outside a prompt
pub fn install_terminal_guards() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();
}

/// Make sure the cursor is visible again once the run is over
pub fn restore_cursor() {
    let _ = console::Term::stderr().show_cursor();
}
