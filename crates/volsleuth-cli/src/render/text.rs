/// Plain-text report: one block per flagged volume, then a run summary.
use super::size::{format_count, format_size};
use std::io::{self, Write};
use std::path::Path;
use volsleuth_core::model::WarningKind;
use volsleuth_core::{AuditSummary, SubtreeReport};

/// Write every flagged volume's report followed by the summary.
pub fn write_audit(out: &mut impl Write, summary: &AuditSummary) -> io::Result<()> {
    for (root, report) in summary.flagged() {
        write_tenant(out, root, report)?;
    }
    write_summary(out, summary)
}

/// One volume: language mix, flagged files, and any skipped files.
///
/// Percentages print rounded to whole numbers with the extension's dot
/// stripped; files without an extension print an empty language.
pub fn write_tenant(out: &mut impl Write, root: &Path, report: &SubtreeReport) -> io::Result<()> {
    writeln!(out, "Directory: {}", root.display())?;
    writeln!(out)?;
    writeln!(out, "Languages:")?;
    for (ext, pct) in &report.percentages {
        let language = ext.strip_prefix('.').unwrap_or(ext.as_str());
        writeln!(out, "* {pct:.0}% {language}")?;
    }

    writeln!(out)?;
    writeln!(out, "Flags found in files:")?;
    for (path, flags) in &report.file_flags {
        writeln!(out, "{}:", path.display())?;
        for flag in flags {
            writeln!(out, "- {flag}")?;
        }
    }

    if !report.warnings.is_empty() {
        writeln!(out)?;
        writeln!(out, "Skipped files:")?;
        for warning in report.warnings.values() {
            writeln!(
                out,
                "- {}: {}",
                warning.path.display(),
                describe(&warning.kind)
            )?;
        }
    }

    writeln!(out)
}

/// Cross-volume summary: restated flags, excluded folders of every walked
/// volume, and volumes whose walk failed.
pub fn write_summary(out: &mut impl Write, summary: &AuditSummary) -> io::Result<()> {
    if summary.has_flags() {
        writeln!(out, "Summary of flagged files:")?;
        for (path, flags) in summary.flagged_files() {
            writeln!(out, "{}:", path.display())?;
            for flag in flags {
                writeln!(out, "- {flag}")?;
            }
        }
    } else {
        writeln!(out, "No flags found in any volume.")?;
    }

    let folders = summary.excluded_folders();
    if !folders.is_empty() {
        writeln!(out)?;
        writeln!(out, "Excluded folders:")?;
        for folder in folders {
            writeln!(out, "- {}", folder.display())?;
        }
    }

    let failed: Vec<_> = summary.failed().collect();
    if !failed.is_empty() {
        writeln!(out)?;
        writeln!(out, "Volumes that could not be walked:")?;
        for (root, error) in failed {
            writeln!(out, "- {}: {error}", root.display())?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "Scanned {} volumes: {} flagged, {} clean, {} failed",
        format_count(summary.tenants.len()),
        format_count(summary.flagged().count()),
        format_count(summary.clean_count()),
        format_count(summary.failed().count()),
    )
}

fn describe(kind: &WarningKind) -> String {
    match kind {
        WarningKind::TooLarge { size, limit } => format!(
            "too large to inspect ({} > {} limit)",
            format_size(*size),
            format_size(*limit)
        ),
        WarningKind::Unreadable { message } => message.clone(),
    }
}
