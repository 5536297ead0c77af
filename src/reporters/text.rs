//! Text (terminal) reporter: an ASCII table of the report entries

use crate::reporting::Metadata;
use anyhow::Result;
use console::{measure_text_width, pad_str, style, Alignment};

const TITLE: &str = "Energy label report";

/// Color an energy label value, leave everything else alone
fn styled_value(title: &str, value: &str) -> String {
    if !title.contains("Energy Label") {
        return value.to_string();
    }
    match value {
        "A" | "B" => style(value).green().bold().to_string(),
        "C" | "D" => style(value).yellow().bold().to_string(),
        "E" | "F" => style(value).red().bold().to_string(),
        _ => value.to_string(),
    }
}

fn row(left: &str, right: &str, left_width: usize, right_width: usize) -> String {
    format!(
        "| {} | {} |",
        pad_str(left, left_width, Alignment::Left, None),
        pad_str(right, right_width, Alignment::Left, None)
    )
}

/// Render report entries as an ASCII table
pub fn render(metadata: &Metadata) -> Result<String> {
    let rows: Vec<(String, String)> = metadata
        .report_table()
        .into_iter()
        .map(|(title, value)| (title.to_string(), styled_value(title, value)))
        .collect();

    let left_width = rows
        .iter()
        .map(|(title, _)| measure_text_width(title))
        .chain(std::iter::once(TITLE.len()))
        .max()
        .unwrap_or(0);
    let right_width = rows
        .iter()
        .map(|(_, value)| measure_text_width(value))
        .max()
        .unwrap_or(0);

    let border = format!("+{}+{}+", "-".repeat(left_width + 2), "-".repeat(right_width + 2));

    let mut lines = vec![
        border.clone(),
        row(TITLE, "", left_width, right_width),
        border.clone(),
    ];
    lines.extend(
        rows.iter()
            .map(|(title, value)| row(title, value, left_width, right_width)),
    );
    lines.push(border);

    Ok(lines.join("\n"))
}
