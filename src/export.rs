// ABOUTME: Renders dynamic monitor records to CSV, JSON, or tabular PDF
// ABOUTME: Format is resolved once at the boundary via the Format enum

use crate::{api::Record, Error, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Per-field value hook, `(field_name, raw_value) -> new_value`. Applied to
/// CSV cells only; JSON and PDF emit raw values (see [`export`]).
pub type FieldTransform<'a> = &'a dyn Fn(&str, &str) -> String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
    Pdf,
}

impl Format {
    /// Resolves a format name, case-insensitively. Unknown names fail with
    /// an error naming the requested format.
    pub fn parse(name: &str) -> Result<Format> {
        match name.to_ascii_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            "pdf" => Ok(Format::Pdf),
            _ => Err(Error::UnsupportedFormat(name.to_string())),
        }
    }

    pub fn default_output(&self) -> &'static str {
        match self {
            Format::Csv => "monitors.csv",
            Format::Json => "monitors.json",
            Format::Pdf => "monitors.pdf",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Pdf => "pdf",
        };
        write!(f, "{}", name)
    }
}

/// Writes `records` to `path` in the given format.
///
/// An empty record list is a no-op. The transform applies to CSV cells only:
/// JSON serializes the raw records verbatim, and PDF cells use the plain
/// string form of each value. Columns come from the first record's keys in
/// insertion order; a key absent from a later record yields an empty cell.
pub fn export(
    records: &[Record],
    format: Format,
    path: &Path,
    transform: Option<FieldTransform>,
) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    match format {
        Format::Csv => export_csv(records, path, transform),
        Format::Json => export_json(records, path),
        Format::Pdf => export_pdf(records, path),
    }
}

fn columns(records: &[Record]) -> Vec<String> {
    records[0].keys().cloned().collect()
}

/// Default string form of a JSON value: strings unquoted, null empty,
/// everything else as compact JSON.
fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn cell(record: &Record, column: &str) -> String {
    record.get(column).map(value_to_string).unwrap_or_default()
}

fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn export_csv(records: &[Record], path: &Path, transform: Option<FieldTransform>) -> Result<()> {
    let columns = columns(records);
    let mut out = String::new();

    out.push_str(&columns.join(","));
    out.push('\n');

    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| {
                let mut value = cell(record, column);
                if let Some(transform) = transform {
                    value = transform(column, &value);
                }
                escape_csv(&value)
            })
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    fs::write(path, out)?;
    Ok(())
}

fn export_json(records: &[Record], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}

// Landscape A4, even column widths, no styling
const PAGE_WIDTH_MM: f32 = 297.0;
const PAGE_HEIGHT_MM: f32 = 210.0;
const MARGIN_MM: f32 = 10.0;
const ROW_STEP_MM: f32 = 7.0;
const FONT_SIZE_PT: f32 = 9.0;

fn export_pdf(records: &[Record], path: &Path) -> Result<()> {
    let columns = columns(records);

    let (doc, page, layer) = PdfDocument::new(
        "Monitors",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "table",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| Error::Pdf(e.to_string()))?;

    let col_width = (PAGE_WIDTH_MM - 2.0 * MARGIN_MM) / columns.len() as f32;
    let mut layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM - ROW_STEP_MM;

    let write_row = |layer: &printpdf::PdfLayerReference, y: f32, cells: &[String]| {
        for (i, text) in cells.iter().enumerate() {
            let x = MARGIN_MM + i as f32 * col_width;
            layer.use_text(text.clone(), FONT_SIZE_PT, Mm(x), Mm(y), &font);
        }
    };

    write_row(&layer, y, &columns);

    for record in records {
        y -= ROW_STEP_MM;
        if y < MARGIN_MM {
            let (page, new_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "table");
            layer = doc.get_page(page).get_layer(new_layer);
            y = PAGE_HEIGHT_MM - MARGIN_MM - ROW_STEP_MM;
        }

        let cells: Vec<String> = columns.iter().map(|column| cell(record, column)).collect();
        write_row(&layer, y, &cells);
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| Error::Pdf(e.to_string()))?;
    Ok(())
}
