//! Org-unit file export
//!
//! Each county run writes three files next to its block input: a GeoJSON
//! FeatureCollection of the units, a geometry-free CSV, and a plain-text
//! data dictionary.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use geo::{LineString, MultiPolygon, Polygon};
use log::debug;
use serde_json::{json, Value};

use crate::counties::County;
use crate::pipeline::OrgUnit;
use crate::utils::paths;

/// Write the GeoJSON, CSV, and README outputs for one county
pub fn export_org_units(units: &[OrgUnit], county: &County, data_dir: &Path) -> Result<()> {
    let dir = paths::county_dir(data_dir, county);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create county directory: {}", dir.display()))?;

    write_geojson(units, &paths::org_units_geojson_path(data_dir, county))?;
    write_csv(units, &paths::org_units_csv_path(data_dir, county))?;
    write_readme(county, &paths::readme_path(data_dir, county))?;
    debug!("exported {} units to {}", units.len(), dir.display());
    Ok(())
}

/// Write units as a GeoJSON FeatureCollection
pub fn write_geojson(units: &[OrgUnit], path: &Path) -> Result<()> {
    let features: Vec<Value> = units.iter().map(unit_feature).collect();
    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });
    let raw = serde_json::to_string_pretty(&collection)?;
    fs::write(path, raw)
        .with_context(|| format!("Failed to write GeoJSON file: {}", path.display()))?;
    Ok(())
}

fn unit_feature(unit: &OrgUnit) -> Value {
    json!({
        "type": "Feature",
        "properties": {
            "id": unit.id,
            "org_type": unit.org_type.as_str(),
            "black_hh": unit.black_hh(),
            "total_population": unit.counts.total_population,
            "black_population": unit.counts.black_population,
            "population_18plus": unit.counts.population_18plus,
            "black_population_18plus": unit.counts.black_population_18plus,
            "housing_units": unit.counts.housing_units,
            "pct_black": unit.pct_black,
            "pct_black_18plus": unit.pct_black_18plus,
            "square_miles": unit.square_miles,
            "block_geoids": unit.block_geoids,
            "support_volunteer_name": unit.contact.support_volunteer_name,
            "support_volunteer_phone": unit.contact.support_volunteer_phone,
            "support_volunteer_email": unit.contact.support_volunteer_email,
            "block_team_member": unit.contact.block_team_member,
            "block_team_phone": unit.contact.block_team_phone,
            "block_team_email": unit.contact.block_team_email,
            "notes": unit.contact.notes,
        },
        "geometry": {
            "type": "MultiPolygon",
            "coordinates": multipolygon_coordinates(&unit.geometry),
        },
    })
}

fn multipolygon_coordinates(geometry: &MultiPolygon<f64>) -> Value {
    Value::Array(geometry.0.iter().map(polygon_rings).collect())
}

fn polygon_rings(polygon: &Polygon<f64>) -> Value {
    let mut rings = vec![ring_positions(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(ring_positions));
    Value::Array(rings)
}

fn ring_positions(ring: &LineString<f64>) -> Value {
    Value::Array(
        ring.coords()
            .map(|coord| json!([coord.x, coord.y]))
            .collect(),
    )
}

/// Write units as a geometry-free CSV, one row per unit
pub fn write_csv(units: &[OrgUnit], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    writer.write_record([
        "id",
        "org_type",
        "black_hh",
        "total_population",
        "black_population",
        "pct_black",
        "square_miles",
        "support_volunteer_name",
        "support_volunteer_phone",
        "support_volunteer_email",
        "block_team_member",
        "block_team_phone",
        "block_team_email",
        "notes",
    ])?;
    for unit in units {
        writer.write_record([
            unit.id.to_string(),
            unit.org_type.as_str().to_string(),
            unit.black_hh().to_string(),
            unit.counts.total_population.to_string(),
            unit.counts.black_population.to_string(),
            format!("{:.4}", unit.pct_black),
            format!("{:.4}", unit.square_miles),
            unit.contact.support_volunteer_name.clone(),
            unit.contact.support_volunteer_phone.clone(),
            unit.contact.support_volunteer_email.clone(),
            unit.contact.block_team_member.clone(),
            unit.contact.block_team_phone.clone(),
            unit.contact.block_team_email.clone(),
            unit.contact.notes.clone(),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    Ok(())
}

/// Write the plain-text data dictionary for the county's outputs
pub fn write_readme(county: &County, path: &Path) -> Result<()> {
    let date = Local::now().format("%Y-%m-%d");
    let body = format!(
        "Organizing units for {name} County, {state} (FIPS {fips}), generated {date}.\n\
         \n\
         These are census blocks that are majority Black and have at least 50\n\
         Black households (BHH). Adjacent blocks with fewer than 50 BHH are\n\
         aggregated together until around 100 BHH are reached.\n\
         \n\
         Data dictionary:\n\
         \t'id' - Randomized org unit id\n\
         \t'org_type' - 'block' or 'block aggregate'\n\
         \t'black_hh' - Estimated Black households\n\
         \t'total_population' - Total census population\n\
         \t'black_population' - Total census Black population\n\
         \t'pct_black' - Percent Black population (census)\n\
         \t'square_miles' - Area of the unit in square miles\n\
         \t'block_geoids' - GEOIDs of the constituent census blocks\n\
         \t'support_volunteer_name' -\n\
         \t'support_volunteer_phone' -\n\
         \t'support_volunteer_email' -\n\
         \t'block_team_member' -\n\
         \t'block_team_phone' -\n\
         \t'block_team_email' -\n\
         \t'notes' -\n",
        name = county.name,
        state = county.state,
        fips = county.fips,
    );
    fs::write(path, body)
        .with_context(|| format!("Failed to write README: {}", path.display()))?;
    Ok(())
}
