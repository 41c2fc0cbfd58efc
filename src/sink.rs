//! Report persistence: CSV tables and the raw payload dump.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde_json::Value;
use tracing::info;

use crate::aggregate::{ReportRow, TagSummary};
use crate::config::RepoTarget;
use crate::error::Result;

pub const REPORT_HEADER: [&str; 4] = ["Date", "Weekday", "Release Count", "Releases"];
pub const TAG_HEADER: [&str; 3] = ["Package", "Release Count", "Latest Version"];

/// Report file name for a stem, e.g. `stackflow_release_stats.csv`
pub fn report_file_name(stem: &str) -> String {
    format!("{}_release_stats.csv", stem)
}

pub fn tag_file_name(stem: &str) -> String {
    format!("{}_tag_stats.csv", stem)
}

pub fn raw_file_name(stem: &str) -> String {
    format!("{}_release_raw_data.json", stem)
}

/// Quote a CSV field when it contains a delimiter, quote or line break
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_record<W: Write, S: AsRef<str>>(out: &mut W, fields: &[S]) -> Result<()> {
    let line: Vec<String> = fields.iter().map(|f| escape_field(f.as_ref())).collect();
    write!(out, "{}\r\n", line.join(","))?;
    Ok(())
}

/// Write report rows as CSV with the `Date,Weekday,Release Count,Releases` header
pub fn write_report_csv<W: Write>(rows: &[ReportRow], mut out: W) -> Result<()> {
    write_record(&mut out, &REPORT_HEADER)?;
    for row in rows {
        write_record(
            &mut out,
            &[
                row.date.as_str(),
                row.weekday.as_str(),
                row.count.to_string().as_str(),
                row.release_text.as_str(),
            ],
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Write per-package tag counts as CSV
pub fn write_tag_csv<W: Write>(summaries: &[TagSummary], mut out: W) -> Result<()> {
    write_record(&mut out, &TAG_HEADER)?;
    for summary in summaries {
        write_record(
            &mut out,
            &[
                summary.package.as_str(),
                summary.count.to_string().as_str(),
                summary.latest.as_deref().unwrap_or(""),
            ],
        )?;
    }
    out.flush()?;
    Ok(())
}

/// What to persist for one repository
#[derive(Debug, Clone, Copy)]
pub struct ReportFiles<'a> {
    pub rows: &'a [ReportRow],
    pub tags: Option<&'a [TagSummary]>,
    pub raw: Option<&'a [Value]>,
}

/// Writes report files into an output directory, named after the repository
#[derive(Debug, Clone)]
pub struct ReportSink {
    output_dir: PathBuf,
}

impl ReportSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        ReportSink {
            output_dir: output_dir.into(),
        }
    }

    /// Write the report (and the optional extras) under `stem` and return the paths written
    pub fn persist(
        &self,
        target: &RepoTarget,
        stem: &str,
        files: ReportFiles<'_>,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir)?;
        let mut written = Vec::new();

        let report_path = self.output_dir.join(report_file_name(stem));
        write_report_csv(files.rows, BufWriter::new(File::create(&report_path)?))?;
        written.push(report_path);

        if let Some(tags) = files.tags {
            let tag_path = self.output_dir.join(tag_file_name(stem));
            write_tag_csv(tags, BufWriter::new(File::create(&tag_path)?))?;
            written.push(tag_path);
        }

        if let Some(raw) = files.raw {
            let raw_path = self.output_dir.join(raw_file_name(stem));
            let mut out = BufWriter::new(File::create(&raw_path)?);
            serde_json::to_writer_pretty(&mut out, raw)?;
            out.flush()?;
            written.push(raw_path);
        }

        info!(repo = %target, files = written.len(), "Saved report files");
        Ok(written)
    }
}
