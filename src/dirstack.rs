//! Directory history with shell-style pushd/popd

use crate::error::{CpsError, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where the working directory lives
///
/// The OS implementation moves the process-wide working directory; tests
/// substitute an in-memory one.
pub trait WorkingDir {
    fn current(&self) -> std::io::Result<PathBuf>;
    fn change(&mut self, path: &Path) -> std::io::Result<()>;
}

/// The process working directory
#[derive(Debug, Clone, Copy, Default)]
pub struct OsWorkingDir;

impl WorkingDir for OsWorkingDir {
    fn current(&self) -> std::io::Result<PathBuf> {
        env::current_dir()
    }

    fn change(&mut self, path: &Path) -> std::io::Result<()> {
        env::set_current_dir(path)
    }
}

/// Ordered history of visited directories
///
/// Always holds at least the directory that was current at construction.
#[derive(Debug)]
pub struct DirStack<W: WorkingDir = OsWorkingDir> {
    history: Vec<PathBuf>,
    dir: W,
}

impl DirStack<OsWorkingDir> {
    /// Seed the history with the process working directory
    pub fn new() -> Result<Self> {
        Self::with_working_dir(OsWorkingDir)
    }
}

impl<W: WorkingDir> DirStack<W> {
    pub fn with_working_dir(dir: W) -> Result<Self> {
        let seed = dir.current().map_err(CpsError::CurrentDir)?;
        debug!(seed = %seed.display(), "directory stack seeded");
        Ok(Self {
            history: vec![seed],
            dir,
        })
    }

    /// Record `path` and change into it
    ///
    /// The path is recorded before the change is attempted and stays in the
    /// history when the change fails. Recover with [`DirStack::popd`].
    pub fn pushd(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.history.push(path.to_path_buf());

        match self.dir.change(path) {
            Ok(()) => {
                debug!(path = %path.display(), depth = self.history.len(), "pushd");
                Ok(())
            }
            Err(source) => {
                warn!(
                    path = %path.display(),
                    error = %source,
                    "pushd failed, path kept in history"
                );
                Err(CpsError::ChangeDir {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    /// Drop the top entry and change into the entry below it
    ///
    /// No-op at the seed entry, which is never removed.
    pub fn popd(&mut self) -> Result<()> {
        if self.history.len() == 1 {
            return Ok(());
        }

        self.history.pop();
        let target = self.top().to_path_buf();
        debug!(path = %target.display(), depth = self.history.len(), "popd");

        self.dir
            .change(&target)
            .map_err(|source| CpsError::ChangeDir {
                path: target,
                source,
            })
    }

    /// Most recently pushed entry, or the seed
    pub fn top(&self) -> &Path {
        // history is never empty
        &self.history[self.history.len() - 1]
    }

    pub fn history(&self) -> &[PathBuf] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Always false; the seed entry cannot be popped
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn working_dir(&self) -> &W {
        &self.dir
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{lock_cwd, FakeDir};
    use super::*;
    use std::io;

    fn stack(known: &[&str]) -> DirStack<FakeDir> {
        DirStack::with_working_dir(FakeDir::new("/home/user", known)).unwrap()
    }

    #[test]
    fn test_pushd_then_popd_round_trip() {
        let mut dirs = stack(&["/tmp"]);

        dirs.pushd("/tmp").unwrap();
        assert_eq!(dirs.history(), [PathBuf::from("/home/user"), PathBuf::from("/tmp")]);
        assert_eq!(dirs.working_dir().cwd, PathBuf::from("/tmp"));

        dirs.popd().unwrap();
        assert_eq!(dirs.history(), [PathBuf::from("/home/user")]);
        assert_eq!(dirs.working_dir().cwd, PathBuf::from("/home/user"));

        dirs.popd().unwrap();
        assert_eq!(dirs.len(), 1);
        assert_eq!(dirs.working_dir().cwd, PathBuf::from("/home/user"));
    }

    #[test]
    fn test_popd_moves_to_new_top() {
        let mut dirs = stack(&["/a", "/b", "/c"]);
        dirs.pushd("/a").unwrap();
        dirs.pushd("/b").unwrap();
        dirs.pushd("/c").unwrap();

        dirs.popd().unwrap();
        assert_eq!(dirs.top(), Path::new("/b"));
        assert_eq!(dirs.working_dir().cwd, PathBuf::from("/b"));
    }

    #[test]
    fn test_balanced_sequence_returns_to_seed() {
        let paths = ["/a", "/b", "/c", "/a", "/b"];
        let mut dirs = stack(&paths);

        for path in paths {
            dirs.pushd(path).unwrap();
        }
        assert_eq!(dirs.len(), paths.len() + 1);

        for _ in paths {
            dirs.popd().unwrap();
        }
        assert_eq!(dirs.len(), 1);

        for _ in 0..3 {
            dirs.popd().unwrap();
            assert_eq!(dirs.len(), 1);
        }
        assert!(!dirs.is_empty());
    }

    #[test]
    fn test_failed_pushd_keeps_path_in_history() {
        let mut dirs = stack(&[]);

        let err = dirs.pushd("/nonexistent").unwrap_err();
        assert!(matches!(
            err,
            CpsError::ChangeDir { ref source, .. } if source.kind() == io::ErrorKind::NotFound
        ));
        assert_eq!(dirs.top(), Path::new("/nonexistent"));
        assert_eq!(dirs.len(), 2);
        assert_eq!(dirs.working_dir().cwd, PathBuf::from("/home/user"));

        // popd repairs the history
        dirs.popd().unwrap();
        assert_eq!(dirs.history(), [PathBuf::from("/home/user")]);
    }

    #[test]
    fn test_popd_into_missing_directory_reports_target() {
        let mut dirs = stack(&["/b"]);
        let _ = dirs.pushd("/gone");
        dirs.pushd("/b").unwrap();

        let err = dirs.popd().unwrap_err();
        match err {
            CpsError::ChangeDir { path, .. } => assert_eq!(path, PathBuf::from("/gone")),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(dirs.len(), 2);
    }

    #[test]
    fn test_os_pushd_popd() {
        let _guard = lock_cwd();
        let target = tempfile::tempdir().unwrap();

        let mut dirs = DirStack::new().unwrap();
        let seed = dirs.top().to_path_buf();

        dirs.pushd(target.path()).unwrap();
        assert_eq!(
            env::current_dir().unwrap().canonicalize().unwrap(),
            target.path().canonicalize().unwrap()
        );

        dirs.popd().unwrap();
        assert_eq!(
            env::current_dir().unwrap().canonicalize().unwrap(),
            seed.canonicalize().unwrap()
        );
    }

    #[test]
    fn test_os_pushd_missing_directory() {
        let _guard = lock_cwd();
        let scratch = tempfile::tempdir().unwrap();
        let missing = scratch.path().join("nonexistent");

        let mut dirs = DirStack::new().unwrap();
        let before = env::current_dir().unwrap();

        assert!(dirs.pushd(&missing).is_err());
        assert_eq!(dirs.top(), missing.as_path());
        assert_eq!(env::current_dir().unwrap(), before);
    }
}
