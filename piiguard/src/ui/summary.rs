// piiguard/src/ui/summary.rs
//! Detection summary table printed after a run.

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use owo_colors::AnsiColors;
use std::io::{self, Write};

use piiguard_core::{BatchSummary, CombinatorialRule};

use crate::ui::theme::{entry_color, ThemeEntry, ThemeMap};

fn table_color(color: AnsiColors) -> Color {
    match color {
        AnsiColors::Black => Color::Black,
        AnsiColors::Red => Color::DarkRed,
        AnsiColors::Green => Color::DarkGreen,
        AnsiColors::Yellow => Color::DarkYellow,
        AnsiColors::Blue => Color::DarkBlue,
        AnsiColors::Magenta => Color::DarkMagenta,
        AnsiColors::Cyan => Color::DarkCyan,
        AnsiColors::White => Color::Grey,
        AnsiColors::BrightBlack => Color::DarkGrey,
        AnsiColors::BrightRed => Color::Red,
        AnsiColors::BrightGreen => Color::Green,
        AnsiColors::BrightYellow => Color::Yellow,
        AnsiColors::BrightBlue => Color::Blue,
        AnsiColors::BrightMagenta => Color::Magenta,
        AnsiColors::BrightCyan => Color::Cyan,
        AnsiColors::BrightWhite => Color::White,
        _ => Color::Reset,
    }
}

/// Builds the summary table as rows of (label, count).
pub fn summary_rows(summary: &BatchSummary) -> Vec<(String, usize)> {
    let mut rows = vec![
        ("Records processed".to_string(), summary.total),
        ("Flagged as PII".to_string(), summary.pii),
        ("  standalone only".to_string(), summary.standalone),
        ("  combinatorial only".to_string(), summary.combinatorial),
        ("  both".to_string(), summary.both),
        ("Unparsed payloads".to_string(), summary.unparsed),
    ];
    for rule in CombinatorialRule::ALL {
        let count = summary.per_rule.get(&rule).copied().unwrap_or(0);
        rows.push((format!("Rule {}", rule), count));
    }
    rows
}

pub fn print_summary<W: Write>(
    summary: &BatchSummary,
    writer: &mut W,
    theme_map: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    let header_color = table_color(entry_color(theme_map, ThemeEntry::Header));
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Detection").fg(header_color),
            Cell::new("Records").fg(header_color),
        ]);
    if !supports_color {
        table.force_no_tty();
    }

    let name_color = table_color(entry_color(theme_map, ThemeEntry::SummaryRuleName));
    let count_color = table_color(entry_color(theme_map, ThemeEntry::SummaryOccurrences));
    for (label, count) in summary_rows(summary) {
        table.add_row(vec![
            Cell::new(label).fg(name_color),
            Cell::new(count).fg(count_color),
        ]);
    }

    writeln!(writer, "{table}")
}
