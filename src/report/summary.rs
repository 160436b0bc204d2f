//! Per-county partition summary table

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{OrgUnit, PartitionStats};

/// Summary of one county's partition run
#[derive(Debug)]
pub struct PartitionSummary {
    county_label: String,
    stats: PartitionStats,
    unit_count: usize,
    total_black_hh: u32,
    total_square_miles: f64,
}

impl PartitionSummary {
    pub fn new(county_label: &str, stats: PartitionStats, units: &[OrgUnit]) -> Self {
        PartitionSummary {
            county_label: county_label.to_string(),
            stats,
            unit_count: units.len(),
            total_black_hh: units.iter().map(|u| u.black_hh()).sum(),
            total_square_miles: units.iter().map(|u| u.square_miles).sum(),
        }
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("PARTITION SUMMARY").white().bold(),
            style(format!("— {}", self.county_label)).dim()
        );
        println!("    {}", style("─".repeat(56)).dim());

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("Blocks loaded"),
            Cell::new(self.stats.total_blocks),
        ]);
        table.add_row(vec![
            Cell::new("Excluded (under majority threshold)"),
            Cell::new(self.stats.minority_excluded),
        ]);
        table.add_row(vec![
            Cell::new("Single-block units"),
            Cell::new(self.stats.direct_units),
        ]);
        table.add_row(vec![
            Cell::new("Aggregate units (whole clusters)"),
            Cell::new(self.stats.direct_aggregates),
        ]);
        table.add_row(vec![
            Cell::new("Aggregate units (from splitting)"),
            Cell::new(self.stats.split_units),
        ]);

        let dropped = self.stats.clusters_discarded + self.stats.split_discarded;
        table.add_row(vec![
            Cell::new("Dropped (below household floor)"),
            Cell::new(dropped).fg(if dropped == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);

        if self.stats.unassigned_blocks > 0 {
            table.add_row(vec![
                Cell::new("Blocks left unassigned (cap hit)"),
                Cell::new(self.stats.unassigned_blocks).fg(Color::Red),
            ]);
        }
        if self.stats.stalled_kept > 0 {
            table.add_row(vec![
                Cell::new("Units kept from stalled growth"),
                Cell::new(self.stats.stalled_kept).fg(Color::Yellow),
            ]);
        }

        table.add_row(vec![
            Cell::new("Total org units"),
            Cell::new(self.unit_count)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("Total Black households covered"),
            Cell::new(self.total_black_hh),
        ]);
        table.add_row(vec![
            Cell::new("Total area"),
            Cell::new(format!("{:.2} sq mi", self.total_square_miles)),
        ]);

        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }
}
