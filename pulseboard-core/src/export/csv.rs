//! CSV rendering.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::ExportSection;
use crate::error::Result;

/// Quote a field when it carries a delimiter, quote, or newline.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// File name for an exported section: `slug(title)_YYYY-MM-DD.ext`.
pub fn export_filename(title: &str, extension: &str, generated_on: NaiveDate) -> String {
    let slug: String = title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("{}_{}.{}", slug, generated_on.format("%Y-%m-%d"), extension)
}

/// Render one section as CSV text.
///
/// Layout: title line, generated-on line, blank separator, header row, then
/// one row per record.
pub fn render_csv(section: &ExportSection, generated_on: NaiveDate) -> String {
    let mut out = String::new();

    out.push_str(&csv_escape(&section.title));
    out.push('\n');
    out.push_str(&format!(
        "Generated on: {}\n\n",
        generated_on.format("%Y-%m-%d")
    ));

    let headers: Vec<String> = section
        .headers()
        .iter()
        .map(|h| csv_escape(h))
        .collect();
    out.push_str(&headers.join(","));
    out.push('\n');

    for row in section.rows() {
        let fields: Vec<String> = row.iter().map(|f| csv_escape(f)).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

/// Write one section to `dir` as a dated CSV file, returning the path.
pub fn write_csv(
    section: &ExportSection,
    dir: &Path,
    generated_on: NaiveDate,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(&section.title, "csv", generated_on));
    std::fs::write(&path, render_csv(section, generated_on))?;

    tracing::info!(path = %path.display(), "Wrote CSV export");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::business::sample_business_data;
    use crate::export::{standard_sections, ExportSection, SectionData};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(
            export_filename("Revenue Data", "csv", date()),
            "revenue_data_2024-06-14.csv"
        );
    }

    #[test]
    fn test_render_revenue_csv() {
        let sections = standard_sections(&sample_business_data());
        let csv = render_csv(&sections[0], date());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Revenue Data");
        assert_eq!(lines[1], "Generated on: 2024-06-14");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Month,Revenue,Expenses,Profit,Profit Margin");
        // Money values embed commas, so the fields are quoted
        assert_eq!(lines[4], "Jan,\"$12,000\",\"$8,000\",\"$4,000\",33.3%");
        assert_eq!(lines.len(), 4 + 6);
    }

    #[test]
    fn test_write_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let section = ExportSection::new(
            "Key Metrics",
            SectionData::Metrics(sample_business_data().metrics),
        );

        let path = write_csv(&section, dir.path(), date()).unwrap();
        assert!(path.ends_with("key_metrics_2024-06-14.csv"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Metric,Value,Change"));
        assert!(content.contains("Total Revenue,\"$45,231\",+20.1%"));
    }
}
