//! Buffered standard-stream helpers and the directory stack, owned together
//!
//! A [`Session`] replaces process-wide reader/writer singletons: callers
//! build one (usually with [`Session::stdio`]) and pass it where it is
//! needed. Independent sessions never share buffers or history.

use crate::dirstack::{DirStack, OsWorkingDir, WorkingDir};
use crate::error::{CpsError, Result};
use crate::platform::{self, Platform};
use std::fmt;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::trace;

pub struct Session<R: Read = io::Stdin, W: Write = io::Stdout, D: WorkingDir = OsWorkingDir> {
    reader: BufReader<R>,
    writer: BufWriter<W>,
    direct: W,
    dirs: DirStack<D>,
    eol: &'static [u8],
}

impl Session<io::Stdin, io::Stdout, OsWorkingDir> {
    /// Session over the process standard input and output
    pub fn stdio() -> Result<Self> {
        Ok(Self::from_parts(
            DirStack::new()?,
            io::stdin(),
            io::stdout(),
            io::stdout(),
        ))
    }
}

impl<R: Read, W: Write, D: WorkingDir> Session<R, W, D> {
    /// Assemble a session from its streams
    ///
    /// `buffered` backs the string/rune writers, `direct` backs
    /// [`Session::write_bytes`]. Both normally refer to the same stream.
    /// The line terminator is the host platform's.
    pub fn from_parts(dirs: DirStack<D>, input: R, buffered: W, direct: W) -> Self {
        Self {
            reader: BufReader::new(input),
            writer: BufWriter::new(buffered),
            direct,
            dirs,
            eol: platform::host().eol(),
        }
    }

    /// Override the line terminator used by [`Session::writeln`]
    pub fn with_eol(mut self, eol: &'static [u8]) -> Self {
        self.eol = eol;
        self
    }

    pub fn eol(&self) -> &'static [u8] {
        self.eol
    }

    /// Read whatever is available into `buf`
    ///
    /// Returns [`CpsError::EndOfStream`] once the input is exhausted.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.reader.read(buf)? {
            0 => Err(CpsError::EndOfStream),
            n => Ok(n),
        }
    }

    /// Next input line without its `\n` or `\r\n` terminator
    pub fn read_line(&mut self) -> Result<String> {
        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line)? == 0 {
            return Err(CpsError::EndOfStream);
        }

        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        Ok(String::from_utf8_lossy(&line).into_owned())
    }

    /// Write straight to the output, bypassing the buffered writer
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<usize> {
        self.direct.write_all(bytes)?;
        self.direct.flush()?;
        Ok(bytes.len())
    }

    /// Buffer one character; not flushed
    pub fn write_rune(&mut self, ch: char) -> Result<usize> {
        let mut utf8 = [0u8; 4];
        let encoded = ch.encode_utf8(&mut utf8);
        self.writer.write_all(encoded.as_bytes())?;
        Ok(encoded.len())
    }

    /// Write `s` and flush, so it is visible when this returns
    pub fn write_string(&mut self, s: &str) -> Result<usize> {
        self.writer.write_all(s.as_bytes())?;
        self.flush()?;
        Ok(s.len())
    }

    /// Format and write through [`Session::write_string`]; see [`writef!`](crate::writef)
    pub fn writef(&mut self, args: fmt::Arguments<'_>) -> Result<usize> {
        self.write_string(&fmt::format(args))
    }

    /// Write `s` followed by the line terminator
    ///
    /// `s` is flushed; the terminator stays buffered until the next flush.
    pub fn writeln(&mut self, s: &str) -> Result<usize> {
        let n = self.write_string(s)?;
        self.writer.write_all(self.eol)?;
        Ok(n + self.eol.len())
    }

    pub fn flush(&mut self) -> Result<()> {
        trace!(pending = self.writer.buffer().len(), "flushing output");
        self.writer.flush()?;
        Ok(())
    }

    pub fn pushd(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.dirs.pushd(path)
    }

    pub fn popd(&mut self) -> Result<()> {
        self.dirs.popd()
    }

    pub fn dirs(&self) -> &DirStack<D> {
        &self.dirs
    }
}

/// Formatted write through a [`Session`], flushed like `write_string`
///
/// ```no_run
/// let mut session = cps::Session::stdio()?;
/// cps::writef!(session, "pid {}\n", cps::process::pid())?;
/// # Ok::<(), cps::CpsError>(())
/// ```
#[macro_export]
macro_rules! writef {
    ($session:expr, $($arg:tt)*) => {
        $session.writef(format_args!($($arg)*))
    };
}
