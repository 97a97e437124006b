/// Machine-readable exports of an audit: the whole summary as JSON, or
/// the flags alone as CSV rows.
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use volsleuth_core::AuditSummary;

/// One CSV row: a single flag on a single file.
#[derive(Debug, Serialize)]
struct FlagRow<'a> {
    volume: &'a Path,
    path: &'a Path,
    flag: &'a str,
}

/// Pretty-printed JSON of the full summary, including clean and failed
/// volumes.
pub fn write_json(out: &mut impl Write, summary: &AuditSummary) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out)?;
    Ok(())
}

/// `volume,path,flag` rows for every flag, header always present.
pub fn write_csv(out: &mut impl Write, summary: &AuditSummary) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(["volume", "path", "flag"])?;

    for (volume, report) in summary.flagged() {
        for (path, flags) in &report.file_flags {
            for flag in flags {
                writer.serialize(FlagRow {
                    volume,
                    path,
                    flag,
                })?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}
