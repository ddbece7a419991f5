//! Clone and history-reinitialization subprocess operations

use crate::shell::{CommandRunner, ShellError};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Version-control metadata directory stripped by `reinit`.
const GIT_DIR: &str = ".git";

#[derive(Debug, Error)]
pub enum GitError {
    #[error("{0}")]
    Clone(ShellError),

    #[error("{0}")]
    Reinit(ShellError),

    #[error("failed to remove {path}: {source}")]
    RemoveMetadata { path: PathBuf, source: io::Error },
}

impl GitError {
    /// See [`ShellError::is_silent_exit`].
    pub fn is_silent_exit(&self) -> bool {
        match self {
            GitError::Clone(error) | GitError::Reinit(error) => error.is_silent_exit(),
            GitError::RemoveMetadata { .. } => false,
        }
    }
}

/// Drives the two git lifecycle operations through a [`CommandRunner`].
/// Both are one-shot: re-running `clone` against an existing non-empty
/// target fails via git itself.
pub struct GitLifecycle<'a, R> {
    runner: &'a R,
}

impl<'a, R: CommandRunner> GitLifecycle<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    /// Clone `url` into `target`. The error payload is the clone command's
    /// stderr.
    pub async fn clone(&self, url: &str, target: &Path) -> Result<(), GitError> {
        let command = format!("git clone {} {}", url, target.display());
        self.runner.run(&command).await.map_err(GitError::Clone)
    }

    /// Strip the nested version-control history and start a fresh one.
    /// Removal tolerates an absent metadata directory and always completes
    /// before init runs.
    pub async fn reinit(&self, project_dir: &Path) -> Result<(), GitError> {
        let metadata = project_dir.join(GIT_DIR);
        match tokio::fs::remove_dir_all(&metadata).await {
            Ok(()) => {}
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(GitError::RemoveMetadata {
                    path: metadata,
                    source,
                })
            }
        }

        let command = format!("cd {} && git init", project_dir.display());
        self.runner.run(&command).await.map_err(GitError::Reinit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Records each issued command line together with whether the watched
    /// path existed at that moment.
    struct WatchingRunner {
        watched: PathBuf,
        seen: Mutex<Vec<(String, bool)>>,
    }

    impl WatchingRunner {
        fn new(watched: impl Into<PathBuf>) -> Self {
            Self {
                watched: watched.into(),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<(String, bool)> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl CommandRunner for WatchingRunner {
        async fn run(&self, command_line: &str) -> Result<(), ShellError> {
            self.seen
                .lock()
                .unwrap()
                .push((command_line.to_string(), self.watched.exists()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn clone_issues_the_expected_command() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("demo");
        let runner = WatchingRunner::new(&target);

        GitLifecycle::new(&runner)
            .clone("https://example/basic.git", &target)
            .await
            .unwrap();

        let seen = runner.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].0,
            format!("git clone https://example/basic.git {}", target.display())
        );
    }

    #[tokio::test]
    async fn reinit_removes_metadata_before_init() {
        let dir = tempfile::tempdir().unwrap();
        let metadata = dir.path().join(GIT_DIR);
        std::fs::create_dir(&metadata).unwrap();
        std::fs::write(metadata.join("HEAD"), "ref: refs/heads/main").unwrap();

        let runner = WatchingRunner::new(&metadata);
        GitLifecycle::new(&runner).reinit(dir.path()).await.unwrap();

        let seen = runner.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, format!("cd {} && git init", dir.path().display()));
        // The metadata directory was already gone when init ran.
        assert!(!seen[0].1);
        assert!(!metadata.exists());
    }

    #[tokio::test]
    async fn reinit_tolerates_absent_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let runner = WatchingRunner::new(dir.path().join(GIT_DIR));

        GitLifecycle::new(&runner).reinit(dir.path()).await.unwrap();

        assert_eq!(runner.seen().len(), 1);
    }

    #[tokio::test]
    async fn clone_failure_keeps_the_stderr_payload() {
        struct FailingRunner;

        impl CommandRunner for FailingRunner {
            async fn run(&self, _command_line: &str) -> Result<(), ShellError> {
                Err(ShellError::Exit {
                    code: 128,
                    stderr: "fatal: repository not found".to_string(),
                })
            }
        }

        let error = GitLifecycle::new(&FailingRunner)
            .clone("https://example/x.git", Path::new("/tmp/x"))
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "fatal: repository not found");
        assert!(!error.is_silent_exit());
    }
}
