//! stencil - scaffold a project directory from a remote template

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use stencil_core::{
    CliclackPresenter, CliclackPrompter, CreateOptions, PipelineOutcome, ScaffoldOrchestrator,
    ShellCommandRunner, TemplateCatalog,
};

#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(about = "Scaffold a project directory from a remote template")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new project from a template
    Create(CreateArgs),
}

#[derive(Parser, Debug)]
struct CreateArgs {
    /// Install npm dependencies after cloning
    #[arg(
        short = 'a',
        long = "auto-install",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true"
    )]
    auto_install: bool,

    /// Reinitialize the git repository after cloning
    #[arg(
        short = 'r',
        long = "reinitialize-git",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true"
    )]
    reinitialize_git: bool,

    /// Template registry file to use instead of the default
    #[arg(long = "templates")]
    templates: Option<PathBuf>,
}

impl Default for CreateArgs {
    fn default() -> Self {
        Self {
            auto_install: true,
            reinitialize_git: true,
            templates: None,
        }
    }
}

fn print_banner() {
    let logo = r"
   #### ##### ##### #   #  #### ### #
  #       #   #     ##  # #      #  #
   ###    #   ####  # # # #      #  #
      #   #   #     #  ## #      #  #
  ####    #   ##### #   #  #### ### #####
";
    println!("{}", logo.blue());
}

async fn run_create(args: CreateArgs) -> Result<PipelineOutcome> {
    print_banner();
    cliclack::intro("stencil")?;

    let catalog = TemplateCatalog::resolve(args.templates);
    let prompter = CliclackPrompter;
    let presenter = CliclackPresenter::new();
    let runner = ShellCommandRunner;
    let workdir = std::env::current_dir()?;

    let orchestrator =
        ScaffoldOrchestrator::new(&catalog, &prompter, &runner, &presenter, workdir);
    Ok(orchestrator
        .create(CreateOptions {
            auto_install: args.auto_install,
            reinitialize_git: args.reinitialize_git,
        })
        .await)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let create_args = match args.command {
        Some(Command::Create(create_args)) => create_args,
        // No subcommand provided, default to create behavior
        None => CreateArgs::default(),
    };

    let outcome = run_create(create_args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if !outcome?.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn create_flags_default_to_true() {
        let args = Args::parse_from(["stencil", "create"]);
        let Some(Command::Create(create)) = args.command else {
            panic!("expected create subcommand");
        };
        assert!(create.auto_install);
        assert!(create.reinitialize_git);
    }

    #[test]
    fn create_flags_accept_explicit_false() {
        let args = Args::parse_from([
            "stencil",
            "create",
            "--auto-install",
            "false",
            "--reinitialize-git",
            "false",
        ]);
        let Some(Command::Create(create)) = args.command else {
            panic!("expected create subcommand");
        };
        assert!(!create.auto_install);
        assert!(!create.reinitialize_git);
    }

    #[test]
    fn no_subcommand_defaults_to_create_behavior() {
        let args = Args::parse_from(["stencil"]);
        assert!(args.command.is_none());
        let defaults = CreateArgs::default();
        assert!(defaults.auto_install);
        assert!(defaults.reinitialize_git);
    }
}
