//! Spinner-driven lifecycle presentation using cliclack

use crate::descriptor::PackageJson;
use crate::pipeline::{AbortReason, ScaffoldError};
use crate::present::Presenter;
use colored::Colorize;
use std::cell::RefCell;
use std::path::Path;

/// [`Presenter`] that drives one cliclack spinner through the begin/end
/// notification pairs. Built fresh per run; nothing is process-global.
#[derive(Default)]
pub struct CliclackPresenter {
    spinner: RefCell<Option<cliclack::ProgressBar>>,
}

impl CliclackPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn start(&self, message: String) {
        let spinner = cliclack::spinner();
        spinner.start(message);
        *self.spinner.borrow_mut() = Some(spinner);
    }

    fn stop(&self, message: String) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.stop(message);
        }
    }

    fn fail(&self, message: String) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.error(&message);
        }
        let _ = cliclack::outro_cancel(message);
    }
}

impl Presenter for CliclackPresenter {
    fn clone_started(&self, template_name: &str, url: &str) {
        self.start(format!("Cloning {} from {}...", template_name.cyan(), url));
    }

    fn clone_finished(&self, template_name: &str) {
        self.stop(format!("Template {} cloned", template_name.cyan()));
    }

    fn rename_started(&self) {
        self.start("Updating package.json name...".to_string());
    }

    fn rename_finished(&self) {
        self.stop("package.json name updated".to_string());
    }

    fn install_started(&self, descriptor: &PackageJson) {
        self.start(install_message(descriptor));
    }

    fn install_finished(&self) {
        self.stop("npm packages installed".to_string());
    }

    fn reinit_started(&self) {
        self.start("Reinitializing git repository...".to_string());
    }

    fn reinit_finished(&self) {
        self.stop("Git reinitialized".to_string());
    }

    fn structure(&self, rendered: &str) {
        println!("\n{rendered}");
    }

    fn finished(&self, path: &Path) {
        let _ = cliclack::outro(format!(
            "Scaffolded {}",
            path.display().to_string().cyan()
        ));
    }

    fn aborted(&self, reason: AbortReason) {
        self.fail(abort_message(reason).to_string());
    }

    fn failed(&self, error: &ScaffoldError) {
        self.fail(error.to_string());
    }
}

/// Elaborated, user-actionable texts for the fixed abort reasons.
fn abort_message(reason: AbortReason) -> &'static str {
    match reason {
        AbortReason::EmptyProjectName => "Project name is empty. Operation cancelled",
        AbortReason::PathExists => "Target directory already exists. Operation cancelled",
        AbortReason::TemplateDoesNotExist => {
            "Chosen template doesn't exist. Choose another one. Operation cancelled"
        }
        AbortReason::TemplateHasNoUrl => {
            "Chosen template doesn't have a url. Choose another one. Operation cancelled"
        }
        AbortReason::Cancelled => "Operation cancelled by user",
    }
}

/// The install spinner lists what is about to be pulled, per dependency
/// kind.
fn install_message(descriptor: &PackageJson) -> String {
    let mut message = String::from("Installing npm packages...");
    for (kind, deps) in [
        ("dependencies", &descriptor.dependencies),
        ("devDependencies", &descriptor.dev_dependencies),
        ("peerDependencies", &descriptor.peer_dependencies),
    ] {
        let Some(deps) = deps else { continue };
        if deps.is_empty() {
            continue;
        }
        message.push_str(&format!("\n  {kind}:"));
        for name in deps.keys() {
            message.push_str(&format!("\n    {}", name.cyan()));
        }
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_message_lists_only_populated_kinds() {
        let descriptor: PackageJson = serde_json::from_str(
            r#"{
                "dependencies": {"left-pad": "1.0.0"},
                "devDependencies": {},
                "peerDependencies": {"react": "18.0.0"}
            }"#,
        )
        .unwrap();

        colored::control::set_override(false);
        let message = install_message(&descriptor);
        colored::control::unset_override();

        assert!(message.contains("dependencies:"));
        assert!(message.contains("left-pad"));
        assert!(message.contains("peerDependencies:"));
        assert!(message.contains("react"));
        assert!(!message.contains("devDependencies:"));
    }

    #[test]
    fn abort_messages_are_fixed_and_actionable() {
        assert_eq!(
            abort_message(AbortReason::Cancelled),
            "Operation cancelled by user"
        );
        assert!(abort_message(AbortReason::PathExists).contains("already exists"));
    }
}
