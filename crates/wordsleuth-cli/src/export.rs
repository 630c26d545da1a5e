/// Report export — JSON (full report) or CSV (one row per matching file).
///
/// The format is picked from the output file's extension.
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use wordsleuth_core::ScanReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!(
                "unsupported export format for {}: use a .json or .csv file",
                path.display()
            )),
        }
    }
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    generated_at: DateTime<Local>,
    tool_version: &'static str,
    report: &'a ScanReport,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    file_name: String,
    source_path: std::borrow::Cow<'a, str>,
    match_count: u64,
    staged_copy_path: std::borrow::Cow<'a, str>,
}

/// Write `report` to `path` in the format its extension names.
pub fn write_report(report: &ScanReport, path: &Path) -> anyhow::Result<()> {
    let format = ExportFormat::from_path(path).map_err(anyhow::Error::msg)?;
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        ExportFormat::Json => write_json(report, &mut writer)?,
        ExportFormat::Csv => write_csv(report, &mut writer)?,
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(report: &ScanReport, writer: W) -> anyhow::Result<()> {
    let doc = ExportDocument {
        generated_at: Local::now(),
        tool_version: env!("CARGO_PKG_VERSION"),
        report,
    };
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(())
}

pub fn write_csv<W: Write>(report: &ScanReport, writer: W) -> anyhow::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for result in &report.results {
        csv.serialize(CsvRow {
            file_name: result.file_name(),
            source_path: result.source_path.to_string_lossy(),
            match_count: result.match_count,
            staged_copy_path: result.staged_copy_path.to_string_lossy(),
        })?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;
    use wordsleuth_core::model::ProgressSnapshot;
    use wordsleuth_core::{FileResult, TopWordEntry};

    fn sample_report() -> ScanReport {
        ScanReport {
            root: PathBuf::from("/data"),
            started_at: Local::now(),
            duration: Duration::from_millis(12),
            progress: ProgressSnapshot {
                processed: 2,
                total: 2,
            },
            results: vec![FileResult::new(
                PathBuf::from("/data/a.txt"),
                vec![2],
                PathBuf::from("/tmp/Copy_a.txt"),
            )],
            top_words: vec![TopWordEntry {
                word: "spam".into(),
                count: 2,
            }],
            warning_count: 0,
        }
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("r.json")), Ok(ExportFormat::Json));
        assert_eq!(ExportFormat::from_path(Path::new("r.CSV")), Ok(ExportFormat::Csv));
        assert!(ExportFormat::from_path(Path::new("r")).is_err());
    }

    #[test]
    fn json_contains_results_and_ranking() {
        let mut buf = Vec::new();
        write_json(&sample_report(), &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let report = &value["report"];
        assert_eq!(report["results"][0]["match_count"], 2);
        assert_eq!(report["results"][0]["staged_copy_path"], "/tmp/Copy_a.txt");
        assert_eq!(report["top_words"][0]["word"], "spam");
        assert_eq!(report["top_words"][0]["count"], 2);
        assert_eq!(report["progress"]["total"], 2);
    }

    #[test]
    fn csv_has_header_and_one_row_per_match() {
        let mut buf = Vec::new();
        write_csv(&sample_report(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "file_name,source_path,match_count,staged_copy_path");
        assert_eq!(lines[1], "a.txt,/data/a.txt,2,/tmp/Copy_a.txt");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn write_report_creates_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("report.json");
        write_report(&sample_report(), &path).unwrap();
        assert!(std::fs::read_to_string(path).unwrap().contains("\"spam\""));
    }
}
