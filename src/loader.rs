//! CSV ingestion for the raw location, category and business tables.

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use std::io;
use std::path::Path;
use tracing::info;

use crate::categories::CategoryIndex;
use crate::config::SourceConfig;
use crate::error::LoadError;
use crate::models::{
    BusinessRecord, CategoryRecord, CsvBusinessRecord, CsvCategoryRecord, CsvLocationRecord,
    LocationRecord,
};
use crate::taxonomy::{Taxonomy, TaxonomyBuilder};

/// Deserialize every row of a CSV source, keeping each row's line number
fn read_rows<T, R>(reader: R, source: &str) -> Result<Vec<(u64, T)>, LoadError>
where
    T: DeserializeOwned,
    R: io::Read,
{
    let csv_err = |e: csv::Error| LoadError::Csv {
        path: source.to_string(),
        source: e,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = reader.headers().map_err(csv_err)?.clone();

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record).map_err(csv_err)? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: T = record.deserialize(Some(&headers)).map_err(csv_err)?;
        rows.push((line, row));
    }

    Ok(rows)
}

fn open(path: &Path) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Parse location rows; `source` names the input in error messages
pub fn read_locations<R: io::Read>(reader: R, source: &str) -> Result<Vec<LocationRecord>, LoadError> {
    read_rows::<CsvLocationRecord, _>(reader, source)?
        .into_iter()
        .map(|(line, row)| {
            row.to_location().map_err(|reason| LoadError::Malformed {
                path: source.to_string(),
                line,
                reason,
            })
        })
        .collect()
}

pub fn read_categories<R: io::Read>(reader: R, source: &str) -> Result<Vec<CategoryRecord>, LoadError> {
    Ok(read_rows::<CsvCategoryRecord, _>(reader, source)?
        .into_iter()
        .map(|(_, row)| row.to_category())
        .collect())
}

pub fn read_businesses<R: io::Read>(reader: R, source: &str) -> Result<Vec<BusinessRecord>, LoadError> {
    Ok(read_rows::<CsvBusinessRecord, _>(reader, source)?
        .into_iter()
        .map(|(_, row)| row.to_business())
        .collect())
}

pub fn load_locations(path: &Path) -> Result<Vec<LocationRecord>, LoadError> {
    info!("Reading locations from {:?}", path);
    let records = read_locations(open(path)?, &path.display().to_string())?;
    info!("Parsed {} location records", records.len());
    Ok(records)
}

pub fn load_categories(path: &Path) -> Result<CategoryIndex, LoadError> {
    info!("Reading categories from {:?}", path);
    let records = read_categories(open(path)?, &path.display().to_string())?;
    let index = CategoryIndex::new(records)?;
    info!("Loaded {} categories", index.len());
    Ok(index)
}

pub fn load_businesses(path: &Path) -> Result<Vec<BusinessRecord>, LoadError> {
    info!("Reading businesses from {:?}", path);
    let records = read_businesses(open(path)?, &path.display().to_string())?;
    info!("Parsed {} business records", records.len());
    Ok(records)
}

/// Read the configured sources and build a validated taxonomy.
///
/// Any unrecognized jurisdiction fails the whole load.
pub fn load_taxonomy(config: &SourceConfig) -> Result<Taxonomy, LoadError> {
    let locations = load_locations(&config.locations)?;
    let businesses = match &config.businesses {
        Some(path) => load_businesses(path)?,
        None => Vec::new(),
    };

    let taxonomy = TaxonomyBuilder::new()
        .with_businesses(&businesses)
        .build(&locations)?;
    Ok(taxonomy)
}
