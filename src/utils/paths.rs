//! Data-directory layout
//!
//! Everything lives under one data directory:
//! `states/<ST>/counties/<County>/` holds the per-county block input and
//! org-unit outputs, and `fips.tsv` at the root is the county lookup table.

use std::path::{Path, PathBuf};

use crate::counties::County;

/// Default data directory: the platform data dir, or `.orgunits` in the
/// home directory as a fallback
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("orgunits"))
        .or_else(|| dirs::home_dir().map(|dir| dir.join(".orgunits")))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// The county lookup table shipped at the data-directory root
pub fn fips_table_path(data_dir: &Path) -> PathBuf {
    data_dir.join("fips.tsv")
}

/// Directory holding one county's input and output files
pub fn county_dir(data_dir: &Path, county: &County) -> PathBuf {
    data_dir
        .join("states")
        .join(&county.state)
        .join("counties")
        .join(&county.name)
}

/// The county's census block input file
pub fn blocks_path(data_dir: &Path, county: &County) -> PathBuf {
    county_dir(data_dir, county).join(format!("{}_blocks.geojson", county.name))
}

/// The county's org-unit GeoJSON output file
pub fn org_units_geojson_path(data_dir: &Path, county: &County) -> PathBuf {
    county_dir(data_dir, county).join(format!("{}_orgunits.geojson", county.name))
}

/// The county's org-unit CSV output file
pub fn org_units_csv_path(data_dir: &Path, county: &County) -> PathBuf {
    county_dir(data_dir, county).join(format!("{}_orgunits.csv", county.name))
}

/// The county's data-dictionary README
pub fn readme_path(data_dir: &Path, county: &County) -> PathBuf {
    county_dir(data_dir, county).join("README.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wake() -> County {
        County {
            fips: "37183".to_string(),
            name: "Wake".to_string(),
            state: "NC".to_string(),
        }
    }

    #[test]
    fn county_files_nest_under_state_and_county() {
        let base = Path::new("/data");
        assert_eq!(
            blocks_path(base, &wake()),
            PathBuf::from("/data/states/NC/counties/Wake/Wake_blocks.geojson")
        );
        assert_eq!(
            org_units_csv_path(base, &wake()),
            PathBuf::from("/data/states/NC/counties/Wake/Wake_orgunits.csv")
        );
    }
}
