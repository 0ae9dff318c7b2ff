use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Year-month bucket derived from an order date.
/// Same calendar year and month always produce equal values,
/// and the derived ordering makes `max` yield the latest month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
}

impl MonthPeriod {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// One cleaned sales line item.
/// Order numbers group line items by order; they are not unique per row.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub order_number: u32,
    pub order_date: NaiveDate,
    pub revenue: f64,
    pub product_code: String,
    pub product_line: String,
    pub country: String,
    pub customer_name: String,
    pub month_period: MonthPeriod,
}

/// Chat input from API
#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    pub query: String,
}

/// Chat output
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Structured filter input for the non-conversational pathway
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub product_line: Option<String>,
    pub country: Option<String>,
}

/// Headline KPIs, rounded to 2 decimal places at this edge only
#[derive(Debug, Serialize, PartialEq)]
pub struct KpiSummary {
    pub total_revenue: f64,
    pub total_orders: u64,
    pub avg_order_value: f64,
}

/// Label/value series consumed by the frontend charts
#[derive(Debug, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}
