use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes reported by the `cps` binary
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCode {
    NoError = 0,
    InvalidArguments = 1,
    DirectoryError = 2,
    RuntimeError = 3,
    EndOfStream = 4,
}

impl ReturnCode {
    pub fn as_exit_code(self) -> i32 {
        self as i32
    }
}

/// Main error type for cps operations
#[derive(Error, Debug)]
pub enum CpsError {
    #[error("Invalid command line arguments: {0}")]
    InvalidArguments(String),

    #[error("End of input stream")]
    EndOfStream,

    #[error("Cannot read current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("Cannot change directory to {}", .path.display())]
    ChangeDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CpsError {
    /// Convert error to the appropriate return code
    pub fn to_return_code(&self) -> ReturnCode {
        match self {
            CpsError::InvalidArguments(_) => ReturnCode::InvalidArguments,
            CpsError::EndOfStream => ReturnCode::EndOfStream,
            CpsError::CurrentDir(_) => ReturnCode::DirectoryError,
            CpsError::ChangeDir { .. } => ReturnCode::DirectoryError,
            CpsError::IoError(_) => ReturnCode::RuntimeError,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        self.to_return_code().as_exit_code()
    }

    /// True when the error only signals exhausted input
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, CpsError::EndOfStream)
    }
}

/// Result type alias for cps operations
pub type Result<T> = std::result::Result<T, CpsError>;

impl From<CpsError> for i32 {
    fn from(error: CpsError) -> Self {
        error.exit_code()
    }
}
