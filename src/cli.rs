use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cps - portable process facts and stdio helpers
///
/// Prints process identity, copies standard input through buffered
/// helpers, and walks a directory stack the way pushd/popd do.
#[derive(Parser, Debug)]
#[command(
    name = "cps",
    version,
    about = "Portable process identity, directory stack and stdio helpers",
    long_about = "Inspect the running process (pid, parent pid, uid/gid, elevation),\n\
                  copy standard input line by line, or walk a pushd/popd stack.\n\
                  Set CPS_LOG to a tracing filter (e.g. cps=debug) for diagnostics."
)]
pub struct Cli {
    /// Be verbose about what you're doing (repeat for more)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print process identity and platform facts
    Info {
        /// Print values only, one per line, without keys
        #[arg(short = 'p', long = "plain")]
        plain: bool,
    },

    /// Copy standard input to standard output line by line
    Cat {
        /// Number the output lines
        #[arg(short = 'n', long = "number")]
        number: bool,
    },

    /// Push each directory in turn, then pop back, printing the stack top
    Walk {
        /// Directories to visit
        #[arg(required = true, value_name = "DIR")]
        dirs: Vec<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose > 0
    }
}
