//! Interactive search over stdin
//!
//! One query per line, results written after each line. Rankings are memoized
//! per distinct query for the lifetime of the session.

use crate::catalog::Entity;
use crate::cli::InteractiveArgs;
use crate::config::Config;
use crate::error::AppError;
use crate::search::{SearchIndex, SearchSession};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

/// Render one query's results as plain text lines
pub fn format_results(query: &str, results: &[&Entity]) -> String {
    let mut out = format!("> {}\n", query);

    if results.is_empty() {
        out.push_str("  (no matches)\n");
        return out;
    }

    for (rank, entity) in results.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {:<16} {} ({})\n",
            rank + 1,
            entity.id,
            entity.name,
            entity.kind
        ));
    }

    out
}

/// Answer queries from `reader` until EOF
///
/// Blank lines are skipped. Returns the number of queries answered.
pub async fn run_session<R, W>(
    index: &SearchIndex,
    limit: usize,
    reader: R,
    mut writer: W,
) -> Result<usize, AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = SearchSession::new(index, limit);
    let mut lines = reader.lines();
    let mut answered = 0usize;

    while let Some(line) = lines.next_line().await? {
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        let results = session.search(query);
        debug!("Query '{}' returned {} results", query, results.len());

        writer
            .write_all(format_results(query, &results).as_bytes())
            .await?;
        writer.flush().await?;
        answered += 1;
    }

    debug!(
        "Session answered {} queries ({} distinct)",
        answered,
        session.cached_queries()
    );
    Ok(answered)
}

/// Shared implementation for the interactive command
pub async fn execute_interactive(args: InteractiveArgs) -> Result<String, AppError> {
    let config = Config::resolve(&args.catalog, args.limit)?;
    let index = config.load_index()?;

    info!(
        "Interactive search over {} components (limit {})",
        index.len(),
        config.limit
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    let answered = run_session(&index, config.limit, stdin, stdout).await?;

    Ok(format!("Answered {} queries", answered))
}
