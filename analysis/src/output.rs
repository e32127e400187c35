//! Output formatting for aggregate results.
//!
//! The CSV and Table renderings reproduce the summary document layout:
//! count, combination, one column per license category, an empty
//! separator column, then one column per signature group in lexicographic
//! signature order. The count is duplicated into every required category
//! column and into the combination's signature group column, and a
//! trailing totals row sums every numeric column. Signature-group columns
//! come from an explicit ordered key list, never positional arithmetic.

use license_summary_core::{AggregateResult, LicenseCategory};

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Csv,
    Json,
    Yaml,
    Table,
}

/// Formats an aggregate result in the requested output format.
pub fn format_summary(result: &AggregateResult, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Csv => summary_to_csv(result),
        OutputFormat::Json => serde_json::to_string_pretty(result)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(result).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(summary_to_table(result)),
    }
}

/// The summary document as a rectangular grid of display strings.
struct SummaryGrid {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    totals: Vec<String>,
}

fn build_grid(result: &AggregateResult) -> SummaryGrid {
    // Signature groups in lexicographic signature order; one output column
    // each.
    let signatures: Vec<&str> = result.signature_groups.keys().map(String::as_str).collect();

    let mut header = vec!["Count".to_string(), "Role Combination".to_string()];
    header.extend(LicenseCategory::ALL.iter().map(|c| c.name().to_string()));
    header.push(String::new());
    header.extend(signatures.iter().map(|s| s.to_string()));

    let mut rows = Vec::with_capacity(result.ranked.len());
    let mut count_total = 0usize;
    let mut category_totals = [0usize; LicenseCategory::ALL.len()];
    let mut group_totals = vec![0usize; signatures.len()];

    for (key, count) in &result.ranked {
        let mut row = vec![count.to_string(), key.clone()];
        let requirement = result.requirements.get(key).copied().unwrap_or_default();

        count_total += count;
        for (idx, category) in LicenseCategory::ALL.iter().enumerate() {
            if requirement.requires(*category) {
                row.push(count.to_string());
                category_totals[idx] += count;
            } else {
                row.push(String::new());
            }
        }
        row.push(String::new());

        for (idx, signature) in signatures.iter().enumerate() {
            let in_group = result
                .signature_groups
                .get(*signature)
                .is_some_and(|group| group.contains_key(key));
            if in_group {
                row.push(count.to_string());
                group_totals[idx] += count;
            } else {
                row.push(String::new());
            }
        }
        rows.push(row);
    }

    let mut totals = vec![count_total.to_string(), "Total".to_string()];
    totals.extend(category_totals.iter().map(|t| t.to_string()));
    totals.push(String::new());
    totals.extend(group_totals.iter().map(|t| t.to_string()));

    SummaryGrid {
        header,
        rows,
        totals,
    }
}

fn summary_to_csv(result: &AggregateResult) -> Result<String, String> {
    let grid = build_grid(result);
    let mut writer = csv::Writer::from_writer(Vec::new());

    let write_failed = |e: csv::Error| format!("CSV write failed: {e}");
    writer.write_record(&grid.header).map_err(write_failed)?;
    for row in &grid.rows {
        writer.write_record(row).map_err(write_failed)?;
    }
    writer.write_record(&grid.totals).map_err(write_failed)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| format!("CSV flush failed: {e}"))?;
    String::from_utf8(bytes).map_err(|e| format!("CSV output was not UTF-8: {e}"))
}

fn summary_to_table(result: &AggregateResult) -> String {
    let grid = build_grid(result);
    let columns = grid.header.len();

    let mut widths = vec![0usize; columns];
    for row in std::iter::once(&grid.header)
        .chain(grid.rows.iter())
        .chain(std::iter::once(&grid.totals))
    {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.len());
        }
    }

    let mut out = String::new();
    let mut push_row = |row: &[String]| {
        let rendered: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(idx, cell)| format!("{:<width$}", cell, width = widths[idx]))
            .collect();
        out.push_str(rendered.join("  ").trim_end());
        out.push('\n');
    };

    push_row(&grid.header);
    for row in &grid.rows {
        push_row(row);
    }
    push_row(&grid.totals);
    out
}
