//! 平台能力抽象層
//!
//! 此模組定義行程身分與平台常數的共同介面。在 Unix 系統上使用 POSIX
//! uid/gid 模型，在 Windows 上沒有 uid/gid，以 token 提權狀態判斷管理員。

/// Value reported for identity facts the platform has no concept of
pub const UNAVAILABLE: i64 = -1;

/// Platform capability trait
///
/// Every identity query has a default returning [`UNAVAILABLE`], so a
/// platform only overrides what it can actually report.
pub trait Platform {
    /// Process id of the caller
    fn pid(&self) -> i64;

    /// Parent process id exactly as the OS reports it (may be 0)
    fn raw_ppid(&self) -> i64 {
        UNAVAILABLE
    }

    fn uid(&self) -> i64 {
        UNAVAILABLE
    }

    fn gid(&self) -> i64 {
        UNAVAILABLE
    }

    fn euid(&self) -> i64 {
        UNAVAILABLE
    }

    fn egid(&self) -> i64 {
        UNAVAILABLE
    }

    /// Whether the process runs with administrative privileges
    fn is_elevated(&self) -> bool {
        false
    }

    /// End-of-line byte sequence
    fn eol(&self) -> &'static [u8] {
        b"\n"
    }
}

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::{Host, EOL};

#[cfg(windows)]
mod win32;
#[cfg(windows)]
pub use win32::{Host, EOL};

#[cfg(not(any(unix, windows)))]
pub const EOL: &[u8] = b"\n";

/// Host without any identity model; only the pid is known
#[cfg(not(any(unix, windows)))]
#[derive(Debug, Clone, Copy, Default)]
pub struct Host;

#[cfg(not(any(unix, windows)))]
impl Platform for Host {
    fn pid(&self) -> i64 {
        i64::from(std::process::id())
    }
}

/// The platform implementation selected for this build
pub fn host() -> Host {
    Host
}
