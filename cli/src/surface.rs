//! Prompt and display seams between the flows and the terminal.
//!
//! Flows only see these traits; any host surface that can ask a question and
//! show a banner can drive them. Cancellation (empty input where a value is
//! required, or an invalid selection) comes back as `None` and means
//! "operation abandoned, no error shown."

use std::io::{self, BufRead, Write};

use serde_json::Value;

/// Single-line prompts, list selection, and yes/no confirmation.
pub trait PromptSurface {
    /// Ask for one line of input. `None` means the user cancelled.
    ///
    /// `masked` is a rendering request for secret values; surfaces honor it
    /// best-effort.
    fn input(&self, prompt: &str, placeholder: &str, masked: bool) -> Option<String>;

    /// Pick one entry from `labels`. `None` means the user cancelled.
    fn pick(&self, prompt: &str, labels: &[String]) -> Option<usize>;

    /// Modal yes/no confirmation; only an explicit yes returns true.
    fn confirm(&self, message: &str) -> bool;
}

/// Banners and read-only JSON rendering.
pub trait DisplaySurface {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn show_json(&self, title: &str, value: &Value);
}

/// Stdin/stdout implementation of both surfaces.
pub struct Terminal;

impl Terminal {
    fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None, // EOF
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!("Failed to read from stdin: {e}");
                None
            }
        }
    }
}

impl PromptSurface for Terminal {
    fn input(&self, prompt: &str, placeholder: &str, _masked: bool) -> Option<String> {
        if placeholder.is_empty() {
            print!("{prompt}: ");
        } else {
            print!("{prompt} [{placeholder}]: ");
        }
        let _ = io::stdout().flush();

        self.read_line()
    }

    fn pick(&self, prompt: &str, labels: &[String]) -> Option<usize> {
        println!("{prompt}");
        for (i, label) in labels.iter().enumerate() {
            println!("  {}. {label}", i + 1);
        }
        print!("Choice (1-{}, empty to cancel): ", labels.len());
        let _ = io::stdout().flush();

        let line = self.read_line()?;
        if line.trim().is_empty() {
            return None;
        }
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=labels.len()).contains(&n) => Some(n - 1),
            _ => None,
        }
    }

    fn confirm(&self, message: &str) -> bool {
        print!("{message} [y/N]: ");
        let _ = io::stdout().flush();

        matches!(
            self.read_line().as_deref().map(str::trim),
            Some("y" | "Y" | "yes" | "Yes")
        )
    }
}

impl DisplaySurface for Terminal {
    fn info(&self, message: &str) {
        println!("mcpman: {message}");
    }

    fn warn(&self, message: &str) {
        println!("mcpman: warning: {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("mcpman: error: {message}");
    }

    fn show_json(&self, title: &str, value: &Value) {
        println!("--- {title} ---");
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{text}"),
            Err(_) => println!("{value}"),
        }
    }
}
