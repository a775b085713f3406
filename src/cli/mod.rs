pub mod setup;
pub mod ui;

use crate::core::config::Config;
use anyhow::{Result, bail};
use std::io::{self, Write};
use tracing::info;

pub const QUERY_PROMPT: &str = "Please enter your query for currency exchange: ";

/// Runs a single query and prints every reply line to stdout.
///
/// `words` are the command-line words of the query; when there are none the
/// query is read from stdin.
pub async fn ask(config: &Config, words: Vec<String>) -> Result<()> {
    let query = query_from(words, || ui::read_query_from_stdin(QUERY_PROMPT))?;
    info!(%query, "Answering query");

    let spinner = ui::new_spinner("Asking the model...");
    let result = crate::run_query(config, &query).await;
    spinner.finish_and_clear();

    write_reply(&result?, &mut io::stdout().lock())
}

/// Joins the query words, falling back to `read_line` when none were given.
pub fn query_from(
    words: Vec<String>,
    read_line: impl FnOnce() -> Result<String>,
) -> Result<String> {
    let query = if words.is_empty() {
        read_line()?
    } else {
        words.join(" ")
    };

    let query = query.trim();
    if query.is_empty() {
        bail!("No query given");
    }
    Ok(query.to_string())
}

/// Writes the reply lines in order, one per line.
pub fn write_reply<W: Write>(lines: &[String], output: &mut W) -> Result<()> {
    for line in lines {
        writeln!(output, "{line}")?;
    }
    output.flush()?;
    Ok(())
}
