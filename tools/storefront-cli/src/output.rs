//! Output formatting for the CLI.

use console::style;
use storefront_commerce::prelude::*;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// One option as shown in a picker row: selected in bold green brackets,
/// unreachable options dimmed.
pub fn option_badge(option: &OptionAvailability) -> String {
    match (option.is_selected, option.is_disabled) {
        (true, false) => style(format!("[{}]", option.name)).green().bold().to_string(),
        (true, true) => style(format!("[{}]", option.name)).red().bold().to_string(),
        (false, true) => style(&option.name).dim().to_string(),
        (false, false) => option.name.clone(),
    }
}

/// Picker row for one attribute, e.g. `size: [L] XL XS`.
pub fn picker_row(attribute: &AttributeAvailability) -> String {
    let options: Vec<String> = attribute.options.iter().map(option_badge).collect();
    format!("{}: {}", attribute.name, options.join(" "))
}

/// Quantity with the stepper state, e.g. `- 2 +` with unavailable steps dimmed.
pub fn quantity_stepper(item: &CartItem) -> String {
    let minus = if item.can_decrement() { style("-") } else { style("-").dim() };
    let plus = if item.can_increment() { style("+") } else { style("+").dim() };
    format!("{} {} {}", minus, item.quantity(), plus)
}
