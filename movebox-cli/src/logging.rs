//! Logger setup: terminal output through `log`, optionally mirrored to a file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Writes to stdout and to a log file with ANSI escapes removed.
struct TeeWriter {
    file: strip_ansi_escapes::Writer<File>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        self.file.flush()
    }
}

/// Install the global logger.
///
/// `--quiet` shows warnings and errors only, `--verbose` adds debug
/// messages with timestamps. `RUST_LOG` overrides both.
pub(crate) fn init_logging(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(level.as_str()));
    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| match record.level() {
            log::Level::Error | log::Level::Warn => {
                writeln!(buf, "{}: {}", record.level().as_str().to_lowercase(), record.args())
            }
            _ => writeln!(buf, "{}", record.args()),
        });
    }

    match logfile {
        Some(path) => {
            let file = File::create(path)?;
            builder.target(Target::Pipe(Box::new(TeeWriter {
                file: strip_ansi_escapes::Writer::new(file),
            })));
        }
        None => {
            builder.target(Target::Stdout);
        }
    }

    builder.try_init().map_err(io::Error::other)
}
