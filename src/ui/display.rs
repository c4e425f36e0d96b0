//! Result rendering for the terminal front-end.

use std::path::Path;

use bytesize::ByteSize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use console::style;
use cryptkit::{FileMetadata, Integrity, PasswordStrengthReport, Processing, StrengthLevel};

pub fn metadata_table(metadata: &FileMetadata, integrity: Integrity) -> Table {
    let integrity = match integrity {
        Integrity::Verified => "verified",
        Integrity::Mismatch => "MISMATCH",
        Integrity::Unchecked => "not recorded",
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_content_arrangement(ContentArrangement::Dynamic).set_header(vec!["Field", "Value"]);

    let rows = [
        ("Name", metadata.original_name.clone()),
        ("Type", metadata.mime_type.clone()),
        ("Size", ByteSize::b(metadata.size).to_string()),
        ("Algorithm", metadata.algorithm.to_string()),
        ("Chunks", format!("{} x {}", metadata.chunk_count, ByteSize::b(metadata.chunk_size as u64))),
        ("Integrity", integrity.to_owned()),
    ];
    for (field, value) in rows {
        table.add_row(vec![Cell::new(field), Cell::new(value)]);
    }
    table
}

pub fn strength_table(report: &PasswordStrengthReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_content_arrangement(ContentArrangement::Dynamic).set_header(vec!["Score", "Level", "Feedback"]);
    table.add_row(vec![Cell::new(report.score), Cell::new(report.level), Cell::new(report.feedback.join("\n"))]);
    table
}

pub fn show_metadata(metadata: &FileMetadata, integrity: Integrity) {
    println!("{}", metadata_table(metadata, integrity));
}

pub fn show_strength(report: &PasswordStrengthReport) {
    let level = match report.level {
        StrengthLevel::VeryStrong | StrengthLevel::Strong => style(report.level).green(),
        StrengthLevel::Moderate => style(report.level).yellow(),
        StrengthLevel::Weak | StrengthLevel::VeryWeak => style(report.level).red(),
    };

    println!("{}", strength_table(report));
    println!("{} {}", style("Strength:").bold(), level);
}

pub fn show_success(processing: Processing, path: &Path) {
    let action = match processing {
        Processing::Encryption => "encrypted",
        Processing::Decryption => "decrypted",
    };

    println!();
    println!("{} {}", style("✓").green(), style(format!("File {action} successfully: {}", path.display())).bold());
}

pub fn show_integrity_warning() {
    eprintln!("{} {}", style("!").yellow().bold(), style("Warning: file integrity check failed").yellow());
}
