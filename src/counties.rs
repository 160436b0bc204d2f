//! County lookup against the FIPS reference table
//!
//! The table is plain TSV (`fips`, `name`, `state` columns) loaded once into
//! a read-only `CountyIndex` owned by the caller; there is no process-wide
//! cache. Free-text queries mix state abbreviations, state/county FIPS
//! codes, and county names.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;

/// One county row from the reference table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct County {
    /// Five-digit FIPS code (two state digits + three county digits)
    pub fips: String,
    pub name: String,
    /// Two-letter state abbreviation
    pub state: String,
}

impl County {
    pub fn state_fips(&self) -> &str {
        &self.fips[..2.min(self.fips.len())]
    }
}

/// Read-only lookup table over all county rows
#[derive(Debug, Clone)]
pub struct CountyIndex {
    counties: Vec<County>,
}

impl CountyIndex {
    /// Load the index from a TSV file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open FIPS table: {}", path.display()))?;
        Self::from_reader(file)
            .with_context(|| format!("Failed to parse FIPS table: {}", path.display()))
    }

    /// Build the index from any TSV reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut tsv = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_reader(reader);
        let counties = tsv
            .deserialize()
            .collect::<Result<Vec<County>, _>>()
            .context("Malformed county row")?;
        debug!("loaded {} counties into the index", counties.len());
        Ok(CountyIndex { counties })
    }

    pub fn len(&self) -> usize {
        self.counties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counties.is_empty()
    }

    /// All counties matching a bit of free text.
    ///
    /// Each whitespace-separated component narrows the match: a two-digit
    /// number filters by state FIPS prefix, two letters by state
    /// abbreviation, a longer number by exact county FIPS, and anything
    /// else by exact county name.
    pub fn find(&self, text: &str) -> Vec<County> {
        let mut matches: Vec<&County> = self.counties.iter().collect();

        debug!("finding counties that match {text:?}");
        for component in text.split_whitespace() {
            if component.len() == 2 {
                if component.chars().all(|c| c.is_ascii_digit()) {
                    matches.retain(|c| c.fips.starts_with(component));
                } else {
                    let state = component.to_uppercase();
                    matches.retain(|c| c.state == state);
                }
            } else if component.chars().all(|c| c.is_ascii_digit()) {
                matches.retain(|c| c.fips == component);
            } else {
                matches.retain(|c| c.name == component);
            }
        }

        matches.into_iter().cloned().collect()
    }
}
