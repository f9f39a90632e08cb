//! External build tool invocation.
//!
//! The lifecycle only talks to a [`BuildTool`]: configure with a variable
//! set, build, then install named components. [`CMake`] drives the real
//! `cmake` binary; tests substitute a recording fake.

mod cmake;
mod error;
mod util;

pub use cmake::CMake;
pub use error::ExecuteError;
pub use util::{ExecOptions, command_line, shell_quote};

/// A configure/build/install tool. Calls are made in that order and each
/// must complete before the next one starts.
pub trait BuildTool {
    /// Configure the build tree with the given cache variables.
    fn configure(&mut self, variables: &[(String, String)]) -> Result<(), ExecuteError>;

    /// Build the configured tree.
    fn build(&mut self) -> Result<(), ExecuteError>;

    /// Install one named component into the package folder.
    fn install(&mut self, component: &str) -> Result<(), ExecuteError>;
}
