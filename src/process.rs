//! Process identity and platform facts
//!
//! Read-only queries against the OS. Identity values are `i64` so the `-1`
//! sentinel ([`UNAVAILABLE`]) can stand in for concepts a platform lacks.

use crate::error::{CpsError, Result};
use crate::platform::{self, Platform};
use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{debug, trace};

pub use crate::platform::UNAVAILABLE;

/// CPU architecture of the running binary (e.g. `x86_64`, `aarch64`)
pub const ARCH: &str = env::consts::ARCH;

/// Operating system family (e.g. `linux`, `macos`, `windows`)
pub const PLATFORM: &str = env::consts::OS;

/// Line terminator for this platform
pub const EOL: &[u8] = platform::EOL;

static ARGV: OnceLock<Vec<String>> = OnceLock::new();

fn argv() -> &'static [String] {
    ARGV.get_or_init(|| {
        env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    })
}

/// Command-line arguments without the executable path
pub fn args() -> &'static [String] {
    argv().get(1..).unwrap_or(&[])
}

/// Executable path as given on the command line
pub fn exec_path() -> Option<&'static str> {
    argv().first().map(String::as_str)
}

/// Current working directory
///
/// Fails if the directory can no longer be read, e.g. after it was removed
/// while the process was inside it.
pub fn cwd() -> Result<PathBuf> {
    env::current_dir().map_err(CpsError::CurrentDir)
}

/// Terminate the process with `code`
///
/// Destructors do not run, so anything still sitting in a buffered writer is
/// lost. Flush first.
pub fn exit(code: i32) -> ! {
    debug!(code, "exiting process");
    std::process::exit(code)
}

pub fn pid() -> i64 {
    platform::host().pid()
}

/// Parent process id, or [`UNAVAILABLE`] when the OS reports no parent
pub fn ppid() -> i64 {
    normalize_ppid(platform::host().raw_ppid())
}

/// Real user id; [`UNAVAILABLE`] on Windows
pub fn uid() -> i64 {
    platform::host().uid()
}

/// Real group id; [`UNAVAILABLE`] on Windows
pub fn gid() -> i64 {
    platform::host().gid()
}

/// Effective user id; [`UNAVAILABLE`] on Windows
pub fn euid() -> i64 {
    platform::host().euid()
}

/// Effective group id; [`UNAVAILABLE`] on Windows
pub fn egid() -> i64 {
    platform::host().egid()
}

/// Root on unix, an elevated token on Windows
pub fn is_elevated() -> bool {
    platform::host().is_elevated()
}

pub fn stdin() -> io::Stdin {
    io::stdin()
}

pub fn stdout() -> io::Stdout {
    io::stdout()
}

pub fn stderr() -> io::Stderr {
    io::stderr()
}

fn normalize_ppid(raw: i64) -> i64 {
    if raw == 0 {
        UNAVAILABLE
    } else {
        raw
    }
}

/// Snapshot of every identity fact at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub pid: i64,
    pub ppid: i64,
    pub uid: i64,
    pub gid: i64,
    pub euid: i64,
    pub egid: i64,
    pub elevated: bool,
}

impl Identity {
    /// Identity of the running process
    pub fn current() -> Self {
        Self::from_platform(&platform::host())
    }

    /// Collect identity facts from any platform implementation
    pub fn from_platform<P: Platform>(platform: &P) -> Self {
        let identity = Self {
            pid: platform.pid(),
            ppid: normalize_ppid(platform.raw_ppid()),
            uid: platform.uid(),
            gid: platform.gid(),
            euid: platform.euid(),
            egid: platform.egid(),
            elevated: platform.is_elevated(),
        };
        trace!(?identity, "collected process identity");
        identity
    }

    /// `(name, value)` pairs in a stable order, for display
    pub fn fields(&self) -> [(&'static str, String); 7] {
        [
            ("pid", self.pid.to_string()),
            ("ppid", self.ppid.to_string()),
            ("uid", self.uid.to_string()),
            ("gid", self.gid.to_string()),
            ("euid", self.euid.to_string()),
            ("egid", self.egid.to_string()),
            ("elevated", self.elevated.to_string()),
        ]
    }
}
