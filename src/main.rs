use anyhow::Context;
use cps::cli::{Cli, Command};
use cps::logging::{self, LogConfig};
use cps::process::{self, Identity};
use cps::{writef, CpsError, ReturnCode, Session, WorkingDir};
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    let args = Cli::parse_args();

    if let Err(e) = logging::init(&LogConfig::from_env(args.verbose)) {
        eprintln!("cps: {}", e);
        return e.exit_code();
    }

    let mut session = match Session::stdio() {
        Ok(session) => session,
        Err(e) => {
            eprintln!("cps: {}", e);
            return e.exit_code();
        }
    };

    let result = run_command(&args.command, &mut session);

    // process::exit skips destructors, so nothing flushes the writer for us
    let flushed = session.flush();

    match result.and_then(|()| flushed.map_err(anyhow::Error::from)) {
        Ok(()) => ReturnCode::NoError.as_exit_code(),
        Err(e) => {
            eprintln!("cps: {:#}", e);
            exit_code_of(&e)
        }
    }
}

fn run_command<R: Read, W: Write>(
    command: &Command,
    session: &mut Session<R, W>,
) -> anyhow::Result<()> {
    match command {
        Command::Info { plain } => print_info(session, *plain),
        Command::Cat { number } => copy_lines(session, *number),
        Command::Walk { dirs } => walk(session, dirs),
    }
}

/// Map an error chain back to the exit code of its root `CpsError`
fn exit_code_of(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CpsError>()
        .map(CpsError::exit_code)
        .unwrap_or_else(|| ReturnCode::RuntimeError.as_exit_code())
}

fn print_info<R: Read, W: Write>(session: &mut Session<R, W>, plain: bool) -> anyhow::Result<()> {
    let identity = Identity::current();
    let cwd = process::cwd().context("reading working directory")?;

    let mut fields = Vec::from(identity.fields());
    fields.push(("arch", process::ARCH.to_string()));
    fields.push(("platform", process::PLATFORM.to_string()));
    fields.push(("cwd", cwd.display().to_string()));
    fields.push(("exec", process::exec_path().unwrap_or_default().to_string()));
    fields.push(("args", process::args().join(" ")));

    for (key, value) in fields {
        if plain {
            session.writeln(&value)?;
        } else {
            writef!(session, "{:<9}", format!("{}:", key))?;
            session.writeln(&value)?;
        }
    }
    Ok(())
}

fn copy_lines<R: Read, W: Write>(session: &mut Session<R, W>, number: bool) -> anyhow::Result<()> {
    let mut count = 0usize;
    loop {
        let line = match session.read_line() {
            Ok(line) => line,
            Err(e) if e.is_end_of_stream() => break,
            Err(e) => return Err(e).context("reading standard input"),
        };
        count += 1;

        if number {
            writef!(session, "{:>6}\t", count)?;
        }
        session.writeln(&line)?;
    }

    debug!(lines = count, "input exhausted");
    Ok(())
}

fn walk<R: Read, W: Write, D: WorkingDir>(
    session: &mut Session<R, W, D>,
    dirs: &[PathBuf],
) -> anyhow::Result<()> {
    for dir in dirs {
        if let Err(e) = session.pushd(dir) {
            // a failed pushd leaves the path on the stack
            if let Err(repair) = session.popd() {
                warn!(error = %repair, "popd after failed pushd also failed");
            }
            return Err(e).with_context(|| format!("pushd {}", dir.display()));
        }
        report(session, '+')?;
    }

    info!(depth = session.dirs().len(), "walked all directories");

    while session.dirs().len() > 1 {
        session.popd().context("popd")?;
        report(session, '-')?;
    }
    Ok(())
}

/// Print the directory now on top of the stack
fn report<R: Read, W: Write, D: WorkingDir>(
    session: &mut Session<R, W, D>,
    marker: char,
) -> anyhow::Result<()> {
    let top = session.dirs().top().display().to_string();
    session.write_rune(marker)?;
    session.write_rune(' ')?;
    session.writeln(&top)?;
    Ok(())
}
