use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use lisprims_record::Record;
use lisprims_validate::ValidationResult;
use serde::Serialize;

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ValidationOutput<'a> {
    valid: bool,
    record_count: usize,
    errors: &'a [String],
    warnings: &'a [String],
}

#[derive(Serialize)]
struct ChecksumOutput<'a> {
    text: &'a str,
    checksum: &'a str,
}

pub fn print_records(records: &[Record], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(records),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "KIND", "SEQ", "BODY"]);
            for (index, record) in records.iter().enumerate() {
                table.add_row(vec![
                    (index + 1).to_string(),
                    record.kind().to_string(),
                    record.sequence_number().to_string(),
                    printable(&record.serialize()),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for record in records {
                println!(
                    "{:<10} seq={:<4} {}",
                    record.kind(),
                    record.sequence_number(),
                    printable(&record.serialize())
                );
            }
        }
        OutputFormat::Raw => {
            for record in records {
                println!("{}", record.serialize());
            }
        }
    }
}

pub fn print_validation(result: &ValidationResult, record_count: usize, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&ValidationOutput {
            valid: result.is_valid(),
            record_count,
            errors: result.errors(),
            warnings: result.warnings(),
        }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["SEVERITY", "MESSAGE"]);
            for error in result.errors() {
                table.add_row(vec!["error", error.as_str()]);
            }
            for warning in result.warnings() {
                table.add_row(vec!["warning", warning.as_str()]);
            }
            println!("{table}");
            println!("{}", summary(result, record_count));
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for error in result.errors() {
                println!("error: {error}");
            }
            for warning in result.warnings() {
                println!("warning: {warning}");
            }
            println!("{}", summary(result, record_count));
        }
    }
}

pub fn print_checksum(text: &str, checksum: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&ChecksumOutput { text, checksum }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_header(vec!["TEXT", "CHECKSUM"])
                .add_row(vec![printable(text), checksum.to_string()]);
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => println!("{checksum}"),
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn summary(result: &ValidationResult, record_count: usize) -> String {
    format!(
        "{} ({} records, {} errors, {} warnings)",
        if result.is_valid() { "valid" } else { "invalid" },
        record_count,
        result.errors().len(),
        result.warnings().len()
    )
}

/// Render control characters as `<XX>` so separators stay visible.
pub fn printable(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.push_str(&format!("<{:02X}>", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_marks_control_characters() {
        assert_eq!(printable("A\u{1D}B\rC"), "A<1D>B<0D>C");
        assert_eq!(printable("P|1||LAB"), "P|1||LAB");
    }
}
