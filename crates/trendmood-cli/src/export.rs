//! Structured export of the scored table (CSV or JSON).

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use trendmood_core::{BatchVerdict, SentimentLabel, VideoRecord};
use trendmood_sentiment::{Analysis, SkippedVideo};

use crate::run::ExportFormat;

/// One scored video, joined with the channel metadata from its record.
#[derive(Debug, Serialize)]
pub(crate) struct ExportRow<'a> {
    pub video_id: &'a str,
    pub title: &'a str,
    pub channel_title: Option<&'a str>,
    pub published_at: Option<&'a str>,
    pub label: SentimentLabel,
    pub confidence: f64,
    pub binary_label: i8,
    pub signed_score: f64,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    summary: String,
    verdict: &'a BatchVerdict,
    videos: Vec<ExportRow<'a>>,
    skipped: &'a [SkippedVideo],
}

pub(crate) fn rows<'a>(videos: &'a [VideoRecord], analysis: &'a Analysis) -> Vec<ExportRow<'a>> {
    let by_id: HashMap<&str, &VideoRecord> = videos.iter().map(|v| (v.id.as_str(), v)).collect();
    analysis
        .scored
        .iter()
        .map(|s| {
            let record = by_id.get(s.video_id.as_str());
            ExportRow {
                video_id: &s.video_id,
                title: &s.title,
                channel_title: record.and_then(|r| r.channel_title.as_deref()),
                published_at: record.and_then(|r| r.published_at.as_deref()),
                label: s.label,
                confidence: s.confidence,
                binary_label: s.binary_label,
                signed_score: s.signed_score,
            }
        })
        .collect()
}

/// Write the scored table to `path` in `format`.
pub(crate) fn write_report(
    path: &Path,
    format: ExportFormat,
    videos: &[VideoRecord],
    analysis: &Analysis,
) -> anyhow::Result<()> {
    let file = BufWriter::new(File::create(path)?);
    match format {
        ExportFormat::Csv => write_csv(file, videos, analysis),
        ExportFormat::Json => write_json(file, videos, analysis),
    }
}

pub(crate) fn write_csv<W: Write>(
    writer: W,
    videos: &[VideoRecord],
    analysis: &Analysis,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows(videos, analysis) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub(crate) fn write_json<W: Write>(
    mut writer: W,
    videos: &[VideoRecord],
    analysis: &Analysis,
) -> anyhow::Result<()> {
    let report = JsonReport {
        summary: analysis.verdict.summary_line(),
        verdict: &analysis.verdict,
        videos: rows(videos, analysis),
        skipped: &analysis.skipped,
    };
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
