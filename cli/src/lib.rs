//! Shared setup of the example programs.

use std::io;
use std::process::ExitCode;

use program_core::Program;
use tracing_subscriber::EnvFilter;

/// Default log filter for a `--debug` level; `RUST_LOG` takes precedence.
pub fn log_directive(debug_level: u32) -> &'static str {
    match debug_level {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs a stderr log subscriber. Does nothing if one is already set.
pub fn init_logging(debug_level: u32) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directive(debug_level)));

    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init();
}

/// Parses the process arguments, sets logging up from `--debug`, then prints
/// usage or runs the program.
pub fn execute(program: &mut Program) -> ExitCode {
    let parsed = program.parse(std::env::args().skip(1));
    init_logging(program.debug_level());

    tracing::debug!(program = program.name(), command = ?program.command_full_name(), "Command line parsed");
    program.finish(parsed, &mut io::stderr())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directive() {
        assert_eq!(log_directive(0), "warn");
        assert_eq!(log_directive(1), "info");
        assert_eq!(log_directive(2), "debug");
        assert_eq!(log_directive(3), "trace");
        assert_eq!(log_directive(100), "trace");
    }
}
