//! Command implementations shared by the CLI entry point

pub mod catalog;
pub mod interactive;
pub mod search;

use crate::cli::Commands;
use crate::error::AppError;
use anyhow::{Context, Result};
use std::io::Write;

/// Run one command and return its printable output
pub async fn execute(command: Commands) -> Result<String, AppError> {
    match command {
        Commands::Search(args) => search::execute_search(args),
        Commands::List(args) => catalog::execute_list(args),
        Commands::Interactive(args) => interactive::execute_interactive(args).await,
        Commands::Schema => catalog::execute_schema(),
    }
}

/// Write command output followed by a newline
pub fn write_output<W: Write>(mut writer: W, output: &str) -> Result<()> {
    writeln!(writer, "{}", output).context("Failed to write command output")?;
    writer.flush().context("Failed to flush command output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_output() {
        let mut out = Vec::new();
        write_output(&mut out, "# Catalog").unwrap();
        assert_eq!(out, b"# Catalog\n");
    }

    #[test]
    fn test_write_output_error_has_context() {
        let err = write_output(ClosedPipe, "# Catalog").unwrap_err();
        assert_eq!(err.to_string(), "Failed to write command output");
        let root = err.root_cause().downcast_ref::<io::Error>().unwrap();
        assert_eq!(root.kind(), io::ErrorKind::BrokenPipe);
    }
}
