//! Stencil Core - the scaffold pipeline behind the stencil CLI
//!
//! This library creates a new project directory from a remote template
//! repository: resolve a template interactively, clone it, rewrite its
//! package descriptor, optionally install dependencies and reinitialize
//! version control, then report the resulting layout.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Leaf operations** - [`catalog`] (template registry), [`shell`]
//!   (one-shot command execution), [`descriptor`] (package.json mutation),
//!   [`git`] (clone / history reinit)
//! - **Orchestration** - [`pipeline`], the fixed sequence of validation
//!   gates with its abort/failure taxonomy
//! - **Contracts** - [`prompt`] and [`present`], the narrow interfaces the
//!   pipeline consumes for interactive input and progress display
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt and presenter
//!   implementations
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use stencil_core::{
//!     CreateOptions, ScaffoldOrchestrator, ShellCommandRunner, TemplateCatalog,
//! };
//!
//! let catalog = TemplateCatalog::new("templates.json");
//! let runner = ShellCommandRunner;
//! let orchestrator =
//!     ScaffoldOrchestrator::new(&catalog, &my_prompter, &runner, &my_presenter, workdir);
//! let outcome = orchestrator.create(CreateOptions::default()).await;
//! ```

pub mod catalog;
pub mod descriptor;
pub mod git;
pub mod pipeline;
pub mod present;
pub mod prompt;
pub mod report;
pub mod shell;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use catalog::{Template, TemplateCatalog, TemplateRegistry};
pub use descriptor::PackageJson;
pub use pipeline::{
    AbortReason, CreateOptions, PipelineOutcome, ScaffoldError, ScaffoldOrchestrator,
};
pub use present::{Presenter, SilentPresenter};
pub use prompt::{Choice, Prompter};
pub use shell::{CommandRunner, ShellCommandRunner};

#[cfg(feature = "tui")]
pub use tui::{CliclackPresenter, CliclackPrompter};
