//! Run reports: console summary, JSON and CSV export.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use u_packing_core::{ContainerStats, Placement, SolveResult, SolveSummary, UnplacedItem};

/// Per-container line of a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerRow {
    /// Container index in opening order
    pub index: usize,
    /// Catalog position of the container size, if any
    pub catalog_index: Option<usize>,
    /// Container extents
    pub dimensions: [f64; 3],
    /// Boxes placed inside
    pub item_count: usize,
    /// Container volume
    pub volume: f64,
    /// Utilization in percent
    pub utilization_percent: f64,
}

impl From<&ContainerStats> for ContainerRow {
    fn from(stats: &ContainerStats) -> Self {
        Self {
            index: stats.container_index,
            catalog_index: stats.catalog_index,
            dimensions: stats.dimensions,
            item_count: stats.item_count,
            volume: stats.container_volume,
            utilization_percent: stats.utilization * 100.0,
        }
    }
}

/// Everything recorded about one packing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// "single" or "multi"
    pub mode: String,
    /// Name of the item source
    pub dataset: String,
    /// Hint provider used, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Aggregate figures
    pub summary: SolveSummary,
    /// Per-container figures
    pub containers: Vec<ContainerRow>,
    /// Placement of every placed item
    pub placements: Vec<Placement>,
    /// Items left out, with the reason
    pub unplaced: Vec<UnplacedItem>,
}

impl RunReport {
    /// Builds a report from a solve result.
    pub fn new(mode: impl Into<String>, dataset: impl Into<String>, result: &SolveResult) -> Self {
        Self {
            mode: mode.into(),
            dataset: dataset.into(),
            hint: None,
            summary: SolveSummary::from(result),
            containers: result.containers.iter().map(ContainerRow::from).collect(),
            placements: result.placements.clone(),
            unplaced: result.unplaced.clone(),
        }
    }

    /// Records the hint provider used.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        let s = &self.summary;
        println!("\nPacking Report: {} ({})", self.dataset, self.mode);
        println!("{:=<60}", "");
        println!("  Strategy:          {}", s.strategy);
        if let Some(hint) = &self.hint {
            println!("  Hint:              {}", hint);
        }
        println!(
            "  Items placed:      {} / {}",
            s.total_placed, s.total_requested
        );
        println!("  Items unplaced:    {}", s.total_unplaced);
        println!("  Containers used:   {}", s.containers_used);
        println!("  Container volume:  {}", s.total_container_volume);
        println!("  Utilization:       {:.1}%", s.utilization_percent);
        println!("  Time:              {}ms", s.time_ms);
        if s.truncated {
            println!("  Run truncated before every item was attempted");
        }

        if !self.containers.is_empty() {
            println!("\n  {:<6} {:<24} {:>6} {:>10}", "Index", "Dimensions", "Items", "Util");
            println!("  {:-<50}", "");
            for row in &self.containers {
                let [l, w, h] = row.dimensions;
                println!(
                    "  {:<6} {:<24} {:>6} {:>9.1}%",
                    row.index,
                    format!("{} x {} x {}", l, w, h),
                    row.item_count,
                    row.utilization_percent
                );
            }
        }
    }

    /// Saves the full report as pretty-printed JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Saves one CSV row per placement.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        fs::write(path, self.placements_csv())
    }

    fn placements_csv(&self) -> String {
        let mut csv = String::from(
            "item_id,container_index,x,y,z,length,width,height,rotation_index,from_hint\n",
        );
        for p in &self.placements {
            let _ = writeln!(
                csv,
                "{},{},{},{},{},{},{},{},{},{}",
                p.item_id,
                p.container_index,
                p.position[0],
                p.position[1],
                p.position[2],
                p.dimensions[0],
                p.dimensions[1],
                p.dimensions[2],
                p.rotation_index,
                p.from_hint
            );
        }
        csv
    }
}
