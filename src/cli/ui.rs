use crate::core::progress::progress_pct;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Highlight,
    Positive,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Highlight => style(text).yellow().bold(),
        StyleType::Positive => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Renders a `current/target` pair as a fixed-width text meter, e.g.
/// `[######----] 3/5`. A meter with no valid target renders as "n/a".
pub fn meter(current: u32, target: u32) -> String {
    const WIDTH: usize = 10;
    match progress_pct(f64::from(current), f64::from(target)) {
        Ok(pct) => {
            let filled = ((pct / 100.0) * WIDTH as f64).round() as usize;
            format!(
                "[{}{}] {current}/{target}",
                "#".repeat(filled),
                "-".repeat(WIDTH - filled)
            )
        }
        Err(_) => "n/a".to_string(),
    }
}

/// Cell wrapper for [`meter`], right aligned like the numeric columns.
pub fn meter_cell(current: u32, target: u32) -> Cell {
    Cell::new(meter(current, target)).set_alignment(CellAlignment::Right)
}

/// Creates a new `indicatif::ProgressBar` spinner for short fetches.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("\n{}", "─".repeat(term_width));
}
