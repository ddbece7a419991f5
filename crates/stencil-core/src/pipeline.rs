//! The scaffold pipeline: ordered validation gates and side-effecting
//! steps with two-tier abort/failure semantics.
//!
//! One run is a single linear attempt through a fixed gate order; any gate
//! may terminate the run, nothing is retried, and there is no backward
//! transition. Aborts are expected, user-facing terminations with fixed
//! reason strings; failures carry the underlying tool's diagnostic.

use crate::catalog::{self, CatalogError, Template, TemplateCatalog, TemplateRegistry};
use crate::descriptor::{self, DescriptorError};
use crate::git::{GitError, GitLifecycle};
use crate::present::Presenter;
use crate::prompt::{Choice, PromptCancelled, Prompter};
use crate::report;
use crate::shell::{CommandRunner, ShellError};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Flags of one `create` invocation.
#[derive(Debug, Clone, Copy)]
pub struct CreateOptions {
    pub auto_install: bool,
    pub reinitialize_git: bool,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            auto_install: true,
            reinitialize_git: true,
        }
    }
}

/// Expected, user-facing termination. Reasons are pre-enumerated, short,
/// actionable strings; no underlying-tool error is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    EmptyProjectName,
    PathExists,
    TemplateDoesNotExist,
    TemplateHasNoUrl,
    Cancelled,
}

impl AbortReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbortReason::EmptyProjectName => "empty project name",
            AbortReason::PathExists => "path exists",
            AbortReason::TemplateDoesNotExist => "template does not exist",
            AbortReason::TemplateHasNoUrl => "template has no url",
            AbortReason::Cancelled => "operation cancelled by user",
        }
    }
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Underlying-tool failure, surfaced with its full diagnostic text.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error("{0}")]
    Install(ShellError),
}

/// Terminal state of one pipeline run.
#[derive(Debug)]
pub enum PipelineOutcome {
    Success { path: PathBuf },
    Aborted(AbortReason),
    Failed(ScaffoldError),
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Success { .. })
    }
}

/// Internal gate result. Abort and failure both halt immediately; the
/// distinction is purely how the termination is presented.
enum Halt {
    Abort(AbortReason),
    Fail(ScaffoldError),
}

impl From<AbortReason> for Halt {
    fn from(reason: AbortReason) -> Self {
        Halt::Abort(reason)
    }
}

impl From<PromptCancelled> for Halt {
    fn from(_: PromptCancelled) -> Self {
        Halt::Abort(AbortReason::Cancelled)
    }
}

impl From<CatalogError> for Halt {
    fn from(error: CatalogError) -> Self {
        Halt::Fail(error.into())
    }
}

impl From<DescriptorError> for Halt {
    fn from(error: DescriptorError) -> Self {
        Halt::Fail(error.into())
    }
}

impl From<GitError> for Halt {
    fn from(error: GitError) -> Self {
        // A silent non-zero exit is indistinguishable from an interactive
        // cancel and must be reported as one.
        if error.is_silent_exit() {
            Halt::Abort(AbortReason::Cancelled)
        } else {
            Halt::Fail(error.into())
        }
    }
}

/// Sequences the validation gates and side-effecting steps of one scaffold
/// run. Every collaborator is injected, so the pipeline itself owns no
/// terminal or process state.
pub struct ScaffoldOrchestrator<'a, P, R, N> {
    catalog: &'a TemplateCatalog,
    prompter: &'a P,
    runner: &'a R,
    presenter: &'a N,
    workdir: PathBuf,
}

impl<'a, P, R, N> ScaffoldOrchestrator<'a, P, R, N>
where
    P: Prompter,
    R: CommandRunner,
    N: Presenter,
{
    pub fn new(
        catalog: &'a TemplateCatalog,
        prompter: &'a P,
        runner: &'a R,
        presenter: &'a N,
        workdir: PathBuf,
    ) -> Self {
        Self {
            catalog,
            prompter,
            runner,
            presenter,
            workdir,
        }
    }

    /// Run the pipeline once and emit exactly one terminal notification.
    pub async fn create(&self, options: CreateOptions) -> PipelineOutcome {
        match self.run(options).await {
            Ok(path) => {
                self.presenter.finished(&path);
                PipelineOutcome::Success { path }
            }
            Err(Halt::Abort(reason)) => {
                self.presenter.aborted(reason);
                PipelineOutcome::Aborted(reason)
            }
            Err(Halt::Fail(error)) => {
                self.presenter.failed(&error);
                PipelineOutcome::Failed(error)
            }
        }
    }

    async fn run(&self, options: CreateOptions) -> Result<PathBuf, Halt> {
        // Registry problems are fatal before any prompting.
        let registry = self.catalog.load()?;

        let project_name = self.prompter.ask_text("Project name")?;
        if project_name.trim().is_empty() {
            return Err(AbortReason::EmptyProjectName.into());
        }

        let project_path = self.workdir.join(&project_name);
        // Not atomic with respect to the later clone; an external writer
        // can still race this check.
        if project_path.exists() {
            return Err(AbortReason::PathExists.into());
        }

        let template = self.select_template(&registry)?;
        let url = template.url().ok_or(AbortReason::TemplateHasNoUrl)?;

        let git = GitLifecycle::new(self.runner);

        self.presenter.clone_started(&template.name, url);
        git.clone(url, &project_path).await?;
        self.presenter.clone_finished(&template.name);

        self.presenter.rename_started();
        descriptor::rename(&project_path, &project_name)?;
        self.presenter.rename_finished();

        if options.auto_install {
            self.install(&project_path).await?;
        }

        if options.reinitialize_git {
            self.presenter.reinit_started();
            git.reinit(&project_path).await?;
            self.presenter.reinit_finished();
        }

        // Informational only; a render error never fails the run.
        if let Ok(rendered) = report::render_tree(&project_path) {
            self.presenter.structure(&rendered);
        }

        Ok(project_path)
    }

    fn select_template<'r>(&self, registry: &'r TemplateRegistry) -> Result<&'r Template, Halt> {
        let pool = match registry.type_names() {
            Some(type_names) => {
                let choices: Vec<Choice> = type_names
                    .iter()
                    .map(|name| Choice {
                        label: (*name).to_string(),
                        value: (*name).to_string(),
                        hint: None,
                    })
                    .collect();
                let selected = self.prompter.ask_select_one("Template type", &choices)?;
                registry.templates_for(Some(&selected))
            }
            None => registry.templates_for(None),
        };

        let choices: Vec<Choice> = pool
            .iter()
            .map(|template| Choice {
                label: template.name.clone(),
                value: template.name.clone(),
                hint: (!template.description.is_empty()).then(|| template.description.clone()),
            })
            .collect();
        let selected = self.prompter.ask_select_one("Select a template", &choices)?;

        catalog::find_by_name(pool, &selected)
            .ok_or_else(|| AbortReason::TemplateDoesNotExist.into())
    }

    async fn install(&self, project_path: &Path) -> Result<(), Halt> {
        let descriptor = descriptor::read(project_path)?;
        // Nothing to install means no command at all, not a failed one.
        if !descriptor.has_any_dependency() {
            return Ok(());
        }

        self.presenter.install_started(&descriptor);
        let command = format!("cd {} && npm install", project_path.display());
        self.runner.run(&command).await.map_err(|error| {
            if error.is_silent_exit() {
                Halt::Abort(AbortReason::Cancelled)
            } else {
                Halt::Fail(ScaffoldError::Install(error))
            }
        })?;
        self.presenter.install_finished();
        Ok(())
    }
}
