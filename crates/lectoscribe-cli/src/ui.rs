//! Styled output and interactive prompts.

use anyhow::Result;
use console::style;
use dialoguer::{Input, Password, Select, theme::ColorfulTheme};
use lectoscribe_core::Notifier;

/// Print a styled section header.
pub fn header(text: &str) {
    println!();
    println!("{}", style(text).bold().cyan());
    println!();
}

/// Print a success message.
pub fn success(text: &str) {
    println!("{} {}", style("✓").green().bold(), text);
}

/// Print an error message to stderr.
pub fn error(text: &str) {
    eprintln!("{} {}", style("✗").red().bold(), text);
}

/// Print an info message.
pub fn info(text: &str) {
    println!("{} {}", style("ℹ").blue(), text);
}

/// Get text input.
pub fn input(prompt: &str, default: Option<&str>) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::with_theme(&theme).with_prompt(prompt);
    if let Some(d) = default {
        input = input.default(d.to_string());
    }
    Ok(input.interact_text()?)
}

/// Get hidden password input.
pub fn password(prompt: &str) -> Result<String> {
    let theme = ColorfulTheme::default();
    Ok(Password::with_theme(&theme).with_prompt(prompt).interact()?)
}

/// Select from a list with arrow keys, returning the chosen index.
pub fn select<T: std::fmt::Display>(prompt: &str, items: &[T]) -> Result<usize> {
    let theme = ColorfulTheme::default();
    Ok(Select::with_theme(&theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?)
}

/// Notifier that renders job toasts as styled terminal lines.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        success(message);
    }

    fn error(&self, message: &str) {
        error(message);
    }
}
