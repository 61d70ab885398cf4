//! Item source and container catalog parsers.

use crate::dataset::{Dataset, ItemRecord};
use std::fs;
use std::path::Path;
use thiserror::Error;
use u_packing_d3::{ContainerCatalog, Dimensions};

/// Errors that can occur when loading inputs.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Invalid catalog: {0}")]
    Catalog(#[from] u_packing_d3::Error),
}

/// Parser for item sources and container catalogs.
#[derive(Debug, Default)]
pub struct DatasetParser;

impl DatasetParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses an item source from a CSV file. The dataset is named after the
    /// file stem.
    pub fn parse_items_file(&self, path: impl AsRef<Path>) -> Result<Dataset, ParseError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut dataset = self.parse_items_csv(&content);
        dataset.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(dataset)
    }

    /// Parses `length,width,height,quantity` rows.
    ///
    /// Malformed rows are skipped with a warning and counted in
    /// [`Dataset::skipped_rows`]; blank lines and `#` comments are ignored.
    pub fn parse_items_csv(&self, csv: &str) -> Dataset {
        let mut dataset = Dataset::default();

        for (line_no, line) in data_lines(csv) {
            match parse_item_row(line) {
                Ok(record) => dataset.records.push(record),
                Err(reason) => {
                    log::warn!("Skipping item row {}: {} ({:?})", line_no, reason, line);
                    dataset.skipped_rows += 1;
                }
            }
        }

        dataset
    }

    /// Parses a catalog file; JSON if the content starts with `[`, CSV
    /// otherwise.
    pub fn parse_catalog_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<ContainerCatalog, ParseError> {
        let content = fs::read_to_string(path)?;
        if content.trim_start().starts_with('[') {
            self.parse_catalog_json(&content)
        } else {
            self.parse_catalog_csv(&content)
        }
    }

    /// Parses a JSON array of `[length, width, height]` triples.
    pub fn parse_catalog_json(&self, json: &str) -> Result<ContainerCatalog, ParseError> {
        let triples: Vec<[f64; 3]> = serde_json::from_str(json)?;
        let sizes = triples
            .iter()
            .enumerate()
            .map(|(i, extents)| {
                checked_size(*extents)
                    .map_err(|e| ParseError::InvalidRecord(format!("entry {}: {}", i, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ContainerCatalog::new(sizes)?)
    }

    /// Parses `length,width,height` rows. Unlike item rows, a bad row is an
    /// error.
    pub fn parse_catalog_csv(&self, csv: &str) -> Result<ContainerCatalog, ParseError> {
        let sizes = data_lines(csv)
            .map(|(line_no, line)| {
                parse_catalog_row(line)
                    .map_err(|e| ParseError::InvalidRecord(format!("line {}: {}", line_no, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ContainerCatalog::new(sizes)?)
    }
}

/// Non-blank, non-comment lines with 1-based line numbers.
fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn split_fields(line: &str, expected: usize) -> Result<Vec<&str>, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != expected {
        return Err(format!("expected {} fields, found {}", expected, fields.len()));
    }
    Ok(fields)
}

fn parse_extents(fields: &[&str]) -> Result<[f64; 3], String> {
    let mut extents = [0.0; 3];
    for (slot, field) in extents.iter_mut().zip(fields) {
        *slot = field
            .parse::<f64>()
            .map_err(|_| format!("non-numeric value {:?}", field))?;
    }
    Ok(extents)
}

fn parse_item_row(line: &str) -> Result<ItemRecord, String> {
    let fields = split_fields(line, 4)?;
    let [length, width, height] = parse_extents(&fields[..3])?;
    let quantity = fields[3]
        .parse::<usize>()
        .map_err(|_| format!("quantity {:?} is not a non-negative integer", fields[3]))?;

    let record = ItemRecord::new(length, width, height, quantity);
    if !record.dimensions().is_valid() {
        return Err(format!(
            "extents {:?} must be positive",
            [length, width, height]
        ));
    }
    Ok(record)
}

fn parse_catalog_row(line: &str) -> Result<Dimensions, String> {
    let fields = split_fields(line, 3)?;
    checked_size(parse_extents(&fields)?)
}

fn checked_size(extents: [f64; 3]) -> Result<Dimensions, String> {
    let size = Dimensions::from_array(extents);
    if size.is_valid() {
        Ok(size)
    } else {
        Err(format!("container extents {:?} must be positive and finite", extents))
    }
}
