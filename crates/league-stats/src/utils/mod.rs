use colored::{ColoredString, Colorize};
use num_format::{Locale, ToFormattedString};
use regex::Regex;
use std::sync::LazyLock;

pub mod config;

static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\x1b\\[[0-9;]*m").expect("valid ANSI escape pattern"));

#[macro_export]
macro_rules! println_pad {
    ($($arg:tt)*) => {{
        let __s = format!($($arg)*);
        for __line in __s.lines() {
            println!("    {}", __line);
        }
    }};
}

/// Prints the provided lines inside an ASCII box
pub fn print_ansi_boxed_lines(lines: &[String]) {
    let visible_len = |s: &str| ANSI_ESCAPE.replace_all(s, "").chars().count();

    let width = lines
        .iter()
        .map(|s| visible_len(s.as_str()))
        .max()
        .unwrap_or(0);

    let border = "-".repeat(width + 4);
    println_pad!("{}", border);
    for line in lines {
        let pad = width - visible_len(line.as_str());
        println_pad!("| {}{} |", line, " ".repeat(pad));
    }
    println_pad!("{}", border);
}

/// Formats a percentage with two decimals, e.g. `51.23%`.
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate)
}

/// Formats a game count with thousands separators, e.g. `12,345`.
pub fn format_games(games: f64) -> String {
    (games.max(0.0).round() as u64).to_formatted_string(&Locale::en)
}

/// A win rate colored by whether it is above or below an even matchup.
pub fn colored_win_rate(rate: f64) -> ColoredString {
    let text = format_rate(rate);
    if rate >= 52.0 {
        text.bright_green().bold()
    } else if rate >= 50.0 {
        text.green()
    } else if rate >= 48.0 {
        text.yellow()
    } else {
        text.bright_red()
    }
}
