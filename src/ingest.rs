use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::StringRecord;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{MonthPeriod, Record};

/// Dates in the source CSV look like "2/24/2003 0:00".
const ORDER_DATE_FORMAT: &str = "%m/%d/%Y %H:%M";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read sales data: {0}")]
    Csv(#[from] csv::Error),
    #[error("sales data is missing required column {0}")]
    MissingColumn(&'static str),
    #[error("row {row}: unparsable order date {value:?}")]
    BadOrderDate { row: usize, value: String },
    #[error("no usable rows in {0}")]
    Empty(String),
}

struct Columns {
    order_number: usize,
    order_date: usize,
    sales: usize,
    quantity_ordered: usize,
    price_each: usize,
    product_code: usize,
    product_line: usize,
    country: usize,
    customer_name: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, IngestError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(IngestError::MissingColumn(name))
        };

        Ok(Self {
            order_number: find("ORDERNUMBER")?,
            order_date: find("ORDERDATE")?,
            sales: find("SALES")?,
            quantity_ordered: find("QUANTITYORDERED")?,
            price_each: find("PRICEEACH")?,
            product_code: find("PRODUCTCODE")?,
            product_line: find("PRODUCTLINE")?,
            country: find("COUNTRY")?,
            customer_name: find("CUSTOMERNAME")?,
        })
    }
}

/// Load the sales CSV and clean it into the record set the engine
/// consumes: exact duplicate rows dropped, rows missing sales-critical
/// fields dropped, SALES used as revenue, MonthPeriod derived from the
/// parsed order date.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<Record>, IngestError> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let columns = Columns::resolve(&headers)?;

    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut records = Vec::new();
    let mut duplicates = 0usize;
    let mut dropped = 0usize;
    let mut mismatches = 0usize;

    for (i, row) in reader.records().enumerate() {
        let row = row?;
        // header is line 1
        let line = i + 2;

        if !seen.insert(row.iter().map(str::to_string).collect()) {
            duplicates += 1;
            continue;
        }

        let field = |idx: usize| row.get(idx).unwrap_or("").trim();

        let sales = field(columns.sales).parse::<f64>();
        let quantity = field(columns.quantity_ordered).parse::<f64>();
        let price = field(columns.price_each).parse::<f64>();
        let order_number = field(columns.order_number).parse::<u32>();
        let date_raw = field(columns.order_date);

        let (Ok(sales), Ok(quantity), Ok(price), Ok(order_number)) =
            (sales, quantity, price, order_number)
        else {
            dropped += 1;
            continue;
        };
        if date_raw.is_empty() {
            dropped += 1;
            continue;
        }

        // Precondition for the engine: every kept row has a valid date.
        let order_date = NaiveDateTime::parse_from_str(date_raw, ORDER_DATE_FORMAT)
            .map_err(|_| IngestError::BadOrderDate {
                row: line,
                value: date_raw.to_string(),
            })?
            .date();

        if (sales - quantity * price).abs() >= 0.01 {
            mismatches += 1;
        }

        records.push(Record {
            order_number,
            order_date,
            revenue: sales,
            product_code: field(columns.product_code).to_string(),
            product_line: field(columns.product_line).to_string(),
            country: field(columns.country).to_string(),
            customer_name: field(columns.customer_name).to_string(),
            month_period: MonthPeriod::from_date(order_date),
        });
    }

    if records.is_empty() {
        return Err(IngestError::Empty(path.display().to_string()));
    }

    if mismatches > 0 {
        warn!(
            mismatches,
            "rows where SALES differs from QUANTITYORDERED * PRICEEACH, using SALES as revenue"
        );
    }

    let months: HashSet<MonthPeriod> = records.iter().map(|r| r.month_period).collect();
    let min_year = records.iter().map(|r| r.month_period.year).min().unwrap_or(0);
    let max_year = records.iter().map(|r| r.month_period.year).max().unwrap_or(0);
    info!(
        rows = records.len(),
        duplicates,
        dropped,
        months = months.len(),
        span = %format!("{min_year}-{max_year}"),
        "sales data loaded"
    );

    Ok(records)
}
