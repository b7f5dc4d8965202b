use colored::Colorize;
use prettytable::{format, Cell, Row, Table};

use crate::models::Record;

const COLUMNS: [&str; 5] = ["Name", "Email", "Phone", "Address", "Notes"];

pub struct DisplayFormatter;

impl DisplayFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_header(&self, text: &str) -> String {
        format!("\n=== {} ===", text.bright_white().bold())
    }

    pub fn format_records_table(&self, records: &[Record]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

        table.add_row(Row::new(
            COLUMNS.iter().map(|h| Cell::new(h).style_spec("b")).collect(),
        ));

        for record in records {
            table.add_row(Row::new(
                record
                    .columns()
                    .into_iter()
                    .map(|cell| Cell::new(cell.unwrap_or("-")))
                    .collect(),
            ));
        }

        table.to_string()
    }

    pub fn format_summary(&self, sheet_id: &str, range: &str, count: usize) -> String {
        let count = if count == 0 {
            "no records".yellow().to_string()
        } else {
            format!("{} records", count).green().to_string()
        };
        format!("{} {} ({})", sheet_id, range, count)
    }
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self::new()
    }
}
