pub mod fzf_invoker;

use self::fzf_invoker::FzfInvoker;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Wrapper around the `termenu` picker that keeps the UX consistent across the
/// tool. `None` means the user backed out of the menu.
pub fn choose_one<T: Display + Clone>(title: &str, items: Vec<T>) -> Result<Option<T>> {
    let picker = FzfInvoker::new(title.to_string(), items);
    picker.invoke().context("menu failed")
}

/// Ask for one line of input on stdin; the trailing newline is removed.
pub fn prompt_line(prompt: &str) -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt}: ")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Spinner shown while a request is in flight.
pub fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
