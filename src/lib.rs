//! Portable process identity, a pushd/popd directory stack and buffered
//! standard-stream helpers for scripting-style command-line tools.

pub mod cli;
pub mod dirstack;
pub mod error;
pub mod logging;
pub mod platform;
pub mod process;
pub mod session;

pub use dirstack::{DirStack, OsWorkingDir, WorkingDir};
pub use error::{CpsError, Result, ReturnCode};
pub use process::Identity;
pub use session::Session;
