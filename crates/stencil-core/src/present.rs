//! Lifecycle notifications emitted by the pipeline
//!
//! Pure notifications: no return values, no effect on control flow. The
//! pipeline takes the presenter as a value, so two runs never share
//! terminal state.

use crate::descriptor::PackageJson;
use crate::pipeline::{AbortReason, ScaffoldError};
use std::path::Path;

pub trait Presenter {
    fn clone_started(&self, _template_name: &str, _url: &str) {}
    fn clone_finished(&self, _template_name: &str) {}

    fn rename_started(&self) {}
    fn rename_finished(&self) {}

    /// The descriptor is passed so implementations can list what is about
    /// to be installed.
    fn install_started(&self, _descriptor: &PackageJson) {}
    fn install_finished(&self) {}

    fn reinit_started(&self) {}
    fn reinit_finished(&self) {}

    /// The rendered directory tree of the finished project.
    fn structure(&self, _rendered: &str) {}

    fn finished(&self, _path: &Path) {}
    fn aborted(&self, _reason: AbortReason) {}
    fn failed(&self, _error: &ScaffoldError) {}
}

/// Swallows every notification; backs tests and non-interactive use.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPresenter;

impl Presenter for SilentPresenter {}
