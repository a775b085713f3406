use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Prompt,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Prompt => style(text).cyan().bold(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a spinner on stderr; it stays hidden when stderr is not a terminal.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(style_text(message, StyleType::Subtle));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Shows `prompt` and reads one line from `input`.
pub fn read_query<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    write!(output, "{}", style_text(prompt, StyleType::Prompt))?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read query from stdin")?;
    Ok(line.trim().to_string())
}

/// Reads the query from the process's stdin.
pub fn read_query_from_stdin(prompt: &str) -> Result<String> {
    read_query(prompt, &mut io::stdin().lock(), &mut io::stdout())
}
