//! POSIX identity model backed by nix

use super::Platform;
use nix::unistd::{getegid, geteuid, getgid, getpid, getppid, getuid};

pub const EOL: &[u8] = b"\n";

#[derive(Debug, Clone, Copy, Default)]
pub struct Host;

impl Platform for Host {
    fn pid(&self) -> i64 {
        i64::from(getpid().as_raw())
    }

    fn raw_ppid(&self) -> i64 {
        i64::from(getppid().as_raw())
    }

    fn uid(&self) -> i64 {
        i64::from(getuid().as_raw())
    }

    fn gid(&self) -> i64 {
        i64::from(getgid().as_raw())
    }

    fn euid(&self) -> i64 {
        i64::from(geteuid().as_raw())
    }

    fn egid(&self) -> i64 {
        i64::from(getegid().as_raw())
    }

    fn is_elevated(&self) -> bool {
        geteuid().is_root()
    }

    fn eol(&self) -> &'static [u8] {
        EOL
    }
}
