//! Terminal and JSON output.

use std::fmt::Display;
use std::time::Duration;

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use shop_commerce::catalog::StockLevel;
use shop_commerce::checkout::StatusTone;

/// Writes command results for people or, with `--json`, for scripts.
///
/// In JSON mode every human-facing line is suppressed; commands print a
/// single document through [`Output::json`] and errors go to stderr as
/// `{"error": ...}`.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn say(&self, mark: StyledObject<&str>, msg: impl Display) {
        if !self.json {
            println!("{} {}", mark, msg);
        }
    }

    fn complain(&self, mark: StyledObject<&str>, msg: impl Display) {
        if !self.json {
            eprintln!("{} {}", mark, msg);
        }
    }

    pub fn info(&self, msg: &str) {
        self.say(style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        self.say(style("✓").green(), msg);
    }

    pub fn warn(&self, msg: &str) {
        self.complain(style("⚠").yellow(), msg);
    }

    /// Report a failed command.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Diagnostics shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.complain(style("→").dim(), style(msg).dim());
        }
    }

    /// Section title.
    pub fn header(&self, title: &str) {
        if !self.json {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Indented `label: value` line.
    pub fn kv(&self, label: &str, value: &str) {
        self.say(style(" ").dim(), format_args!("{}: {}", style(label).dim(), value));
    }

    /// Indented bullet.
    pub fn list_item(&self, item: &str) {
        self.say(style(" •").dim(), item);
    }

    /// One row of a fixed-width table.
    pub fn table_row(&self, cells: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let row = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        println!("  {}", row.trim_end());
    }

    /// Print `value` as pretty JSON on stdout.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(doc) => println!("{}", doc),
            Err(e) => tracing::warn!(error = %e, "could not render JSON output"),
        }
    }

    /// Spinner for network calls and the payment pause; hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner().with_message(msg.to_string());
        if let Ok(look) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(look);
        }
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }
}

/// Order status label colored by its tone.
pub fn status_badge(label: &str, tone: StatusTone) -> String {
    let label = style(label);
    match tone {
        StatusTone::Yellow => label.yellow(),
        StatusTone::Blue => label.blue(),
        StatusTone::Purple => label.magenta(),
        StatusTone::Green => label.green(),
        StatusTone::Red => label.red(),
        StatusTone::Gray => label.dim(),
    }
    .to_string()
}

/// Stock count colored by level: green above ten, yellow when low, red
/// when out.
pub fn stock_badge(stock: i64) -> String {
    let count = style(stock.max(0));
    match StockLevel::from_stock(stock) {
        StockLevel::Plenty => count.green(),
        StockLevel::Low => count.yellow(),
        StockLevel::OutOfStock => count.red(),
    }
    .to_string()
}

/// Shorten `text` to `width` characters for table cells.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Honey", 10), "Honey");
        assert_eq!(truncate("Wildflower honey", 6), "Wildf…");
    }

    #[test]
    fn test_badges_keep_text() {
        console::set_colors_enabled(false);
        assert_eq!(stock_badge(-2), "0");
        assert_eq!(stock_badge(12), "12");
        assert_eq!(status_badge("Shipped", StatusTone::Purple), "Shipped");
    }
}
