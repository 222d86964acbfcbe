//! CSV catalog loader
//!
//! Schema problems (missing file, missing column, price text that is not a
//! number) fail the whole load. Individual rows with empty or non-positive
//! prices, unknown plan types or unreadable data amounts are skipped or
//! defaulted with a warning.

use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::plan::{parse_features, Plan, PlanType};
use super::{Catalog, LoadSummary};
use crate::carriers;

pub const REQUIRED_COLUMNS: [&str; 6] = [
    "carrier",
    "plan_type",
    "plan_name",
    "plan_price",
    "plan_data",
    "plan_features",
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to open catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read catalog CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: plan_price '{value}' is not a number")]
    InvalidPrice { row: usize, value: String },

    #[error("catalog loader task failed: {0}")]
    Join(String),
}

/// Column positions resolved from the header row
struct Columns {
    index: HashMap<&'static str, usize>,
    id: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, CatalogError> {
        let position = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));

        let mut index = HashMap::new();
        for column in REQUIRED_COLUMNS {
            let pos = position(column).ok_or(CatalogError::MissingColumn(column))?;
            index.insert(column, pos);
        }

        Ok(Self {
            index,
            id: position("id"),
        })
    }

    fn get<'r>(&self, record: &'r StringRecord, column: &'static str) -> &'r str {
        self.index
            .get(column)
            .and_then(|&i| record.get(i))
            .unwrap_or("")
            .trim()
    }
}

fn is_missing(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("nan")
}

/// Load the whole catalog from a CSV file
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    info!("Reading plan catalog from {}", path.display());

    let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    load_catalog_from_reader(file)
}

pub fn load_catalog_from_reader<R: std::io::Read>(reader: R) -> Result<Catalog, CatalogError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let columns = Columns::resolve(rdr.headers()?)?;

    let mut plans = Vec::new();
    let mut summary = LoadSummary::default();

    for (idx, record) in rdr.records().enumerate() {
        // Row numbers as seen in a spreadsheet: header is row 1
        let row = idx + 2;
        summary.rows_read += 1;

        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(CatalogError::Csv(e)),
            Err(e) => {
                warn!("Skipping row {}: unreadable record: {}", row, e);
                summary.skipped += 1;
                continue;
            }
        };

        match parse_row(&columns, &record, row)? {
            Some(plan) => {
                debug!(
                    "Row {}: {} - {} (${}, {})",
                    row, plan.carrier, plan.plan_name, plan.price, plan.data
                );
                plans.push(plan);
            }
            None => summary.skipped += 1,
        }
    }

    info!(
        "Loaded {} plans from {} rows (skipped {})",
        plans.len(),
        summary.rows_read,
        summary.skipped
    );
    if plans.is_empty() {
        warn!("Plan catalog is empty");
    }

    Ok(Catalog::new(plans, summary))
}

/// Parse one CSV row. `Ok(None)` means the row was skipped.
fn parse_row(columns: &Columns, record: &StringRecord, row: usize) -> Result<Option<Plan>, CatalogError> {
    let raw_price = columns.get(record, "plan_price");
    if is_missing(raw_price) {
        warn!("Skipping row {}: no price", row);
        return Ok(None);
    }

    let price: f64 = raw_price
        .trim_start_matches('$')
        .trim()
        .parse()
        .map_err(|_| CatalogError::InvalidPrice {
            row,
            value: raw_price.to_string(),
        })?;

    if !price.is_finite() || price <= 0.0 {
        warn!("Skipping row {}: invalid price {}", row, raw_price);
        return Ok(None);
    }

    let plan_type: PlanType = match columns.get(record, "plan_type").parse() {
        Ok(t) => t,
        Err(e) => {
            warn!("Skipping row {}: {}", row, e);
            return Ok(None);
        }
    };

    let carrier = carriers::canonical_name(columns.get(record, "carrier"));

    let plan_name = columns.get(record, "plan_name").to_string();
    if plan_name.is_empty() {
        warn!("Row {}: empty plan name", row);
    }

    let raw_data = columns.get(record, "plan_data");
    let data_gb = if is_missing(raw_data) {
        warn!("Row {}: no data amount, treating as 0", row);
        None
    } else {
        match raw_data.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
            _ => {
                warn!("Row {}: unreadable data amount '{}', treating as 0", row, raw_data);
                None
            }
        }
    };

    let features = parse_features(columns.get(record, "plan_features"));

    let id = columns
        .id
        .and_then(|i| record.get(i))
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    Ok(Some(Plan::new(
        id, carrier, plan_name, price, data_gb, plan_type, features,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "carrier,plan_type,plan_name,plan_price,plan_data,plan_features\n";

    fn load(body: &str) -> Result<Catalog, CatalogError> {
        let csv = format!("{}{}", HEADER, body);
        load_catalog_from_reader(csv.as_bytes())
    }

    #[test]
    fn test_loads_valid_rows_in_order() {
        let catalog = load(
            "koodo,postpaid,Koodo 60,45,60,\"5G, Data rollover\"\n\
             public_mobile,prepaid,Basic,15,0.5,None\n",
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let plans = catalog.plans();
        assert_eq!(plans[0].carrier, "Koodo");
        assert_eq!(plans[0].features, vec!["5G", "Data rollover"]);
        assert_eq!(plans[1].carrier, "Public Mobile");
        assert_eq!(plans[1].data, "512MB");
        assert_eq!(plans[1].plan_type, PlanType::Prepaid);
    }

    #[test]
    fn test_skips_empty_and_non_positive_prices() {
        let catalog = load(
            "bell,postpaid,A,,10,\n\
             bell,postpaid,B,None,10,\n\
             bell,postpaid,C,0,10,\n\
             bell,postpaid,D,-5,10,\n\
             bell,postpaid,E,55,10,\n",
        )
        .unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.plans()[0].plan_name, "E");
        assert_eq!(catalog.summary().rows_read, 5);
        assert_eq!(catalog.summary().skipped, 4);
    }

    #[test]
    fn test_non_numeric_price_fails_load() {
        let err = load("bell,postpaid,A,call us,10,\n").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPrice { row: 2, .. }));
    }

    #[test]
    fn test_dollar_prefixed_price() {
        let catalog = load("fido,postpaid,A,$39.50,20,\n").unwrap();
        assert_eq!(catalog.plans()[0].price, 39.5);
    }

    #[test]
    fn test_missing_column_fails_load() {
        let csv = "carrier,plan_type,plan_name,plan_price,plan_data\nbell,postpaid,A,50,10\n";
        let err = load_catalog_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn("plan_features")));
    }

    #[test]
    fn test_malformed_data_counts_as_zero() {
        let catalog = load("rogers,postpaid,A,60,lots,\nrogers,postpaid,B,65,,\n").unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.plans().iter().all(|p| p.data_gb == 0.0));
        assert_eq!(catalog.plans()[0].data, "0");
    }

    #[test]
    fn test_unknown_plan_type_skipped() {
        let catalog = load("telus,business,A,60,10,\ntelus,POSTPAID,B,55,10,\n").unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.plans()[0].plan_name, "B");
    }

    #[test]
    fn test_optional_id_column() {
        let csv = "id,carrier,plan_type,plan_name,plan_price,plan_data,plan_features\n\
                   p-1,virgin,postpaid,A,50,10,\n";
        let catalog = load_catalog_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(catalog.plans()[0].id, "p-1");
        assert_eq!(catalog.plans()[0].carrier, "Virgin");
    }

    #[test]
    fn test_header_only_is_empty_catalog() {
        let catalog = load("").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/plans.csv")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
