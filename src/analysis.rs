use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::intent::{month_abbrev, Intent, PeriodFilter};
use crate::models::{KpiSummary, MonthPeriod, Record};

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        order: u32,
        date: &str,
        revenue: f64,
        product: &str,
        line: &str,
        country: &str,
        customer: &str,
    ) -> Record {
        let order_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        Record {
            order_number: order,
            order_date,
            revenue,
            product_code: product.to_string(),
            product_line: line.to_string(),
            country: country.to_string(),
            customer_name: customer.to_string(),
            month_period: MonthPeriod::from_date(order_date),
        }
    }

    fn sample_records() -> Vec<Record> {
        vec![
            record(101, "2003-02-24", 2871.00, "S10_1678", "Motorcycles", "USA", "Land of Toys Inc."),
            record(101, "2003-02-24", 2765.90, "S10_1949", "Classic Cars", "USA", "Land of Toys Inc."),
            record(102, "2003-10-10", 3884.34, "S10_1678", "Motorcycles", "France", "Reims Collectables"),
            record(103, "2004-10-15", 3746.70, "S12_1099", "Classic Cars", "France", "Lyon Souveniers"),
            record(104, "2004-11-05", 5205.27, "S10_1949", "Classic Cars", "Norway", "Baane Mini Imports"),
            record(105, "2004-11-20", 1710.00, "S12_1099", "Classic Cars", "USA", "Toys4GrownUps.com"),
        ]
    }

    #[test]
    fn test_total_revenue_sums_all_records() {
        let records = sample_records();
        let expected: f64 = records.iter().map(|r| r.revenue).sum();

        match aggregate(&records, Intent::TotalRevenue, &FilterContext::unfiltered()) {
            AggregationResult::Total(total) => assert_eq!(total, expected),
            other => panic!("expected Total, got {:?}", other),
        }
    }

    #[test]
    fn test_total_revenue_response_full_dataset() {
        let records = vec![
            record(1, "2003-01-06", 100000.00, "S10_1678", "Motorcycles", "USA", "A"),
            record(2, "2003-01-09", 23456.78, "S10_1949", "Classic Cars", "USA", "B"),
        ];
        let ctx = FilterContext::unfiltered();
        let result = aggregate(&records, Intent::TotalRevenue, &ctx);
        let response = compose(Intent::TotalRevenue, &result, &ctx);

        assert_eq!(
            response,
            "Based on the full dataset, the total revenue is $123,456.78. \
             That's impressive! Need a breakdown?"
        );
    }

    #[test]
    fn test_top_products_capped_and_descending() {
        let mut records = Vec::new();
        for (i, code) in ["P1", "P2", "P3", "P4", "P5", "P6"].iter().enumerate() {
            records.push(record(
                i as u32,
                "2003-05-01",
                1000.0 * (6 - i) as f64,
                code,
                "Motorcycles",
                "USA",
                "A",
            ));
        }

        match aggregate(&records, Intent::TopProducts, &FilterContext::unfiltered()) {
            AggregationResult::Ranked(top) => {
                assert_eq!(top.len(), 5);
                assert_eq!(top[0].0, "P1");
                assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
                assert!(!top.iter().any(|(code, _)| code == "P6"));
            }
            other => panic!("expected Ranked, got {:?}", other),
        }
    }

    #[test]
    fn test_ranked_ties_keep_first_encountered_order() {
        let records = vec![
            record(1, "2003-05-01", 500.0, "PA", "Motorcycles", "USA", "A"),
            record(2, "2003-05-02", 500.0, "PB", "Motorcycles", "USA", "A"),
            record(3, "2003-05-03", 900.0, "PC", "Motorcycles", "USA", "A"),
        ];

        match aggregate(&records, Intent::TopProducts, &FilterContext::unfiltered()) {
            AggregationResult::Ranked(top) => {
                assert_eq!(top[0].0, "PC");
                assert_eq!(top[1].0, "PA");
                assert_eq!(top[2].0, "PB");
            }
            other => panic!("expected Ranked, got {:?}", other),
        }
    }

    #[test]
    fn test_revenue_by_country_top_three() {
        let records = vec![
            record(1, "2003-05-01", 100.0, "P", "L", "USA", "A"),
            record(2, "2003-05-01", 400.0, "P", "L", "France", "A"),
            record(3, "2003-05-01", 300.0, "P", "L", "Norway", "A"),
            record(4, "2003-05-01", 200.0, "P", "L", "Spain", "A"),
        ];

        match aggregate(&records, Intent::RevenueByCountry, &FilterContext::unfiltered()) {
            AggregationResult::Ranked(top) => {
                assert_eq!(top.len(), 3);
                assert_eq!(top[0].0, "France");
                assert_eq!(top[2].0, "Spain");
            }
            other => panic!("expected Ranked, got {:?}", other),
        }
    }

    #[test]
    fn test_product_line_breakdown_appearance_order() {
        let records = sample_records();

        match aggregate(&records, Intent::RevenueByProductLine, &FilterContext::unfiltered()) {
            AggregationResult::Breakdown(lines) => {
                let labels: Vec<&str> = lines.iter().map(|(l, _)| l.as_str()).collect();
                assert_eq!(labels, vec!["Motorcycles", "Classic Cars"]);
            }
            other => panic!("expected Breakdown, got {:?}", other),
        }
    }

    #[test]
    fn test_orders_counted_distinct() {
        let records = sample_records();
        // 6 line items across 5 distinct orders
        match aggregate(&records, Intent::OrdersCount, &FilterContext::unfiltered()) {
            AggregationResult::Count(count) => assert_eq!(count, 5),
            other => panic!("expected Count, got {:?}", other),
        }
    }

    #[test]
    fn test_average_uses_distinct_orders() {
        let records = vec![
            record(1, "2003-05-01", 600.0, "P", "L", "USA", "A"),
            record(1, "2003-05-01", 400.0, "P2", "L", "USA", "A"),
            record(2, "2003-06-01", 1000.0, "P", "L", "USA", "B"),
        ];

        match aggregate(&records, Intent::AverageOrder, &FilterContext::unfiltered()) {
            AggregationResult::Average(avg) => assert_eq!(avg, 1000.0),
            other => panic!("expected Average, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_scope_degrades_to_zero() {
        let records = sample_records();
        // no records in 2005
        let ctx = FilterContext::from_period(PeriodFilter {
            year: Some(2005),
            month: None,
        });

        match aggregate(&records, Intent::AverageOrder, &ctx) {
            AggregationResult::Average(avg) => assert_eq!(avg, 0.0),
            other => panic!("expected Average, got {:?}", other),
        }
        match aggregate(&records, Intent::OrdersCount, &ctx) {
            AggregationResult::Count(count) => assert_eq!(count, 0),
            other => panic!("expected Count, got {:?}", other),
        }
        match aggregate(&records, Intent::TopProducts, &ctx) {
            AggregationResult::Ranked(top) => assert!(top.is_empty()),
            other => panic!("expected Ranked, got {:?}", other),
        }
    }

    #[test]
    fn test_year_scope_restricts_records() {
        let records = sample_records();
        let ctx = FilterContext::from_period(PeriodFilter {
            year: Some(2004),
            month: None,
        });
        let expected: f64 = records
            .iter()
            .filter(|r| r.order_date.year() == 2004)
            .map(|r| r.revenue)
            .sum();

        match aggregate(&records, Intent::TotalRevenue, &ctx) {
            AggregationResult::Total(total) => assert_eq!(total, expected),
            other => panic!("expected Total, got {:?}", other),
        }

        let result = aggregate(&records, Intent::TopProducts, &ctx);
        let response = compose(Intent::TopProducts, &result, &ctx);
        assert!(response.starts_with("In 2004, the top 5 products by revenue are: "));
    }

    #[test]
    fn test_month_scope_spans_years() {
        let records = sample_records();
        let ctx = FilterContext::from_period(PeriodFilter {
            year: None,
            month: Some(10),
        });
        // October records exist in both 2003 and 2004
        match aggregate(&records, Intent::TotalRevenue, &ctx) {
            AggregationResult::Total(total) => assert_eq!(total, 3884.34 + 3746.70),
            other => panic!("expected Total, got {:?}", other),
        }
        assert_eq!(ctx.prefix, "In Oct, ");
    }

    #[test]
    fn test_sales_by_year_ascending() {
        let records = sample_records();

        match aggregate(&records, Intent::SalesByYear, &FilterContext::unfiltered()) {
            AggregationResult::Breakdown(years) => {
                let labels: Vec<&str> = years.iter().map(|(y, _)| y.as_str()).collect();
                assert_eq!(labels, vec!["2003", "2004"]);
            }
            other => panic!("expected Breakdown, got {:?}", other),
        }
    }

    #[test]
    fn test_latest_month_top_products() {
        let records = sample_records();
        let ctx = FilterContext::unfiltered();

        match aggregate(&records, Intent::ThisMonth, &ctx) {
            AggregationResult::LatestMonth { period, ref top } => {
                assert_eq!(period, Some(MonthPeriod { year: 2004, month: 11 }));
                assert_eq!(top.len(), 2);
                assert_eq!(top[0].0, "S10_1949");
            }
            other => panic!("expected LatestMonth, got {:?}", other),
        }

        let result = aggregate(&records, Intent::ThisMonth, &ctx);
        let response = compose(Intent::ThisMonth, &result, &ctx);
        assert!(response.starts_with("For the latest month (2004-11), top products: "));
    }

    #[test]
    fn test_unknown_intent_gets_fallback_text() {
        let records = sample_records();
        let ctx = FilterContext::unfiltered();
        let result = aggregate(&records, Intent::Unknown, &ctx);
        let response = compose(Intent::Unknown, &result, &ctx);

        assert!(response.starts_with("Hmm, that's a bit unclear"));
        assert!(!response.starts_with("Based on the full dataset"));
    }

    #[test]
    fn test_kpis_rounded_and_distinct() {
        let records = vec![
            record(1, "2003-05-01", 100.25, "P", "L", "USA", "A"),
            record(1, "2003-05-01", 100.0, "P2", "L", "USA", "A"),
            record(2, "2003-06-01", 100.0, "P", "L", "USA", "B"),
        ];
        let summary = kpis(&records);

        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.total_revenue, 300.25);
        assert_eq!(summary.avg_order_value, 150.13);
    }

    #[test]
    fn test_kpis_on_empty_dataset() {
        let summary = kpis(&[]);
        assert_eq!(
            summary,
            KpiSummary {
                total_revenue: 0.0,
                total_orders: 0,
                avg_order_value: 0.0,
            }
        );
    }

    #[test]
    fn test_bad_date_bound_skipped_country_applied() {
        let records = sample_records();
        let filtered = apply_filters(&records, Some("not-a-date"), None, None, Some("France"));

        let expected: Vec<&Record> =
            records.iter().filter(|r| r.country == "France").collect();
        assert_eq!(filtered.len(), expected.len());
        assert!(filtered.iter().all(|r| r.country == "France"));
    }

    #[test]
    fn test_date_bounds_inclusive() {
        let records = sample_records();
        let filtered = apply_filters(
            &records,
            Some("2003-10-10"),
            Some("2004-10-15"),
            None,
            None,
        );

        let dates: Vec<String> =
            filtered.iter().map(|r| r.order_date.to_string()).collect();
        assert_eq!(dates, vec!["2003-10-10", "2004-10-15"]);
    }

    #[test]
    fn test_blank_filters_ignored() {
        let records = sample_records();
        let filtered = apply_filters(&records, Some(""), Some("  "), Some(""), None);
        assert_eq!(filtered.len(), records.len());
    }

    #[test]
    fn test_product_line_filter_exact_case_sensitive() {
        let records = sample_records();
        let filtered = apply_filters(&records, None, None, Some("motorcycles"), None);
        assert!(filtered.is_empty());

        let filtered = apply_filters(&records, None, None, Some("Motorcycles"), None);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_currency_formatting() {
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_whole_currency(1234.6), "$1,235");
        assert_eq!(format_count(1234567), "1,234,567");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn test_filter_context_prefixes() {
        assert_eq!(
            FilterContext::unfiltered().prefix,
            "Based on the full dataset, "
        );
        let year = FilterContext::from_period(PeriodFilter {
            year: Some(2004),
            month: None,
        });
        assert_eq!(year.prefix, "In 2004, ");
        let month = FilterContext::from_period(PeriodFilter {
            year: None,
            month: Some(3),
        });
        assert_eq!(month.prefix, "In Mar, ");
    }

    #[test]
    fn test_monthly_revenue_chronological() {
        let records = sample_records();
        let monthly = monthly_revenue(&records);

        let labels: Vec<String> = monthly.iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(labels, vec!["2003-02", "2003-10", "2004-10", "2004-11"]);
        assert_eq!(monthly[0].1, 2871.00 + 2765.90);
    }
}

/// Year/month narrowing for one query plus the display prefix that
/// describes it in the response.
#[derive(Debug, Clone)]
pub struct FilterContext {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub prefix: String,
}

impl FilterContext {
    pub fn unfiltered() -> Self {
        Self {
            year: None,
            month: None,
            prefix: "Based on the full dataset, ".to_string(),
        }
    }

    /// Year wins over month when the extractor saw both.
    pub fn from_period(period: PeriodFilter) -> Self {
        if let Some(year) = period.year {
            Self {
                year: Some(year),
                month: None,
                prefix: format!("In {year}, "),
            }
        } else if let Some(month) = period.month {
            Self {
                year: None,
                month: Some(month),
                prefix: format!("In {}, ", month_abbrev(month)),
            }
        } else {
            Self::unfiltered()
        }
    }
}

/// What an intent computed; shape depends on the intent.
#[derive(Debug)]
pub enum AggregationResult {
    Total(f64),
    Average(f64),
    Count(u64),
    /// Capped, sorted descending, ties in first-encountered order
    Ranked(Vec<(String, f64)>),
    /// All groups, in appearance or ascending-period order
    Breakdown(Vec<(String, f64)>),
    LatestMonth {
        period: Option<MonthPeriod>,
        top: Vec<(String, f64)>,
    },
    /// help/unknown carry fixed text, no dataset computation
    Guidance,
}

/// Compute the aggregate an intent asks for over the period-scoped dataset.
/// Sums stay at full f64 precision; rounding happens only in `compose`.
pub fn aggregate(records: &[Record], intent: Intent, ctx: &FilterContext) -> AggregationResult {
    let scoped = scope_to_period(records, ctx);

    match intent {
        Intent::TotalRevenue => AggregationResult::Total(total_revenue(&scoped)),
        Intent::TopProducts => {
            AggregationResult::Ranked(top_n(group_revenue(&scoped, |r| r.product_code.as_str()), 5))
        }
        Intent::TopCustomers => {
            AggregationResult::Ranked(top_n(group_revenue(&scoped, |r| r.customer_name.as_str()), 5))
        }
        Intent::RevenueByCountry => {
            AggregationResult::Ranked(top_n(group_revenue(&scoped, |r| r.country.as_str()), 3))
        }
        Intent::RevenueByProductLine => {
            AggregationResult::Breakdown(group_revenue(&scoped, |r| r.product_line.as_str()))
        }
        Intent::AverageOrder => {
            let orders = distinct_orders(&scoped);
            let avg = if orders > 0 {
                total_revenue(&scoped) / orders as f64
            } else {
                0.0
            };
            AggregationResult::Average(avg)
        }
        Intent::OrdersCount => AggregationResult::Count(distinct_orders(&scoped)),
        Intent::SalesByYear => {
            let mut years: BTreeMap<i32, f64> = BTreeMap::new();
            for r in &scoped {
                *years.entry(r.order_date.year()).or_insert(0.0) += r.revenue;
            }
            AggregationResult::Breakdown(
                years.into_iter().map(|(y, v)| (y.to_string(), v)).collect(),
            )
        }
        Intent::ThisMonth => {
            let period = scoped.iter().map(|r| r.month_period).max();
            let top = match period {
                Some(latest) => {
                    let month_rows: Vec<&Record> = scoped
                        .iter()
                        .copied()
                        .filter(|r| r.month_period == latest)
                        .collect();
                    top_n(group_revenue(&month_rows, |r| r.product_code.as_str()), 3)
                }
                None => Vec::new(),
            };
            AggregationResult::LatestMonth { period, top }
        }
        Intent::Help | Intent::Unknown => AggregationResult::Guidance,
    }
}

/// Headline KPIs over a record set; the only place values are rounded.
pub fn kpis(records: &[Record]) -> KpiSummary {
    let rows: Vec<&Record> = records.iter().collect();
    let total = total_revenue(&rows);
    let orders = distinct_orders(&rows);
    let avg = if orders > 0 { total / orders as f64 } else { 0.0 };

    KpiSummary {
        total_revenue: round2(total),
        total_orders: orders,
        avg_order_value: round2(avg),
    }
}

/// Structured filtering for the non-conversational pathway.
/// Blank filters are skipped; an unparsable date bound drops that one
/// bound with a diagnostic and the rest of the filters still apply.
/// Date bounds are inclusive; product line and country match exactly.
pub fn apply_filters(
    records: &[Record],
    date_start: Option<&str>,
    date_end: Option<&str>,
    product_line: Option<&str>,
    country: Option<&str>,
) -> Vec<Record> {
    let start = date_start
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| parse_date_bound(s, "date_start"));
    let end = date_end
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| parse_date_bound(s, "date_end"));
    let product_line = product_line.filter(|p| !p.trim().is_empty());
    let country = country.filter(|c| !c.trim().is_empty());

    records
        .iter()
        .filter(|r| start.map_or(true, |d| r.order_date >= d))
        .filter(|r| end.map_or(true, |d| r.order_date <= d))
        .filter(|r| product_line.map_or(true, |p| r.product_line == p))
        .filter(|r| country.map_or(true, |c| r.country == c))
        .cloned()
        .collect()
}

/// Revenue per month in chronological order, for the monthly chart.
pub fn monthly_revenue(records: &[Record]) -> Vec<(MonthPeriod, f64)> {
    let mut months: BTreeMap<MonthPeriod, f64> = BTreeMap::new();
    for r in records {
        *months.entry(r.month_period).or_insert(0.0) += r.revenue;
    }
    months.into_iter().collect()
}

/// Top-n revenue groups for the chart endpoints.
pub fn ranked_revenue<'a, F>(records: &'a [Record], key: F, n: usize) -> Vec<(String, f64)>
where
    F: Fn(&'a Record) -> &'a str,
{
    let rows: Vec<&Record> = records.iter().collect();
    top_n(group_revenue(&rows, key), n)
}

/// Render an aggregation result as a conversational reply.
pub fn compose(intent: Intent, result: &AggregationResult, ctx: &FilterContext) -> String {
    let prefix = &ctx.prefix;

    match (intent, result) {
        (Intent::TotalRevenue, AggregationResult::Total(total)) => format!(
            "{prefix}the total revenue is {}. That's impressive! Need a breakdown?",
            format_currency(*total)
        ),
        (Intent::TopProducts, AggregationResult::Ranked(top)) => format!(
            "{prefix}the top 5 products by revenue are: {}. Which one interests you most?",
            ranked_list(top)
        ),
        (Intent::TopCustomers, AggregationResult::Ranked(top)) => format!(
            "{prefix}the top 5 customers are: {}. Loyal buyers, right? Want contact info?",
            ranked_list(top)
        ),
        (Intent::RevenueByCountry, AggregationResult::Ranked(top)) => format!(
            "{prefix}revenue by country (top 3): {}. The rest? Let me know if you want all.",
            ranked_list(top)
        ),
        (Intent::RevenueByProductLine, AggregationResult::Breakdown(lines)) => format!(
            "{prefix}revenue by product line: {}. Motorcycles leading the pack!",
            ranked_list(lines)
        ),
        (Intent::AverageOrder, AggregationResult::Average(avg)) => format!(
            "{prefix}the average order value is {}. Solid for e-commerce, any tips to boost it?",
            format_currency(*avg)
        ),
        (Intent::OrdersCount, AggregationResult::Count(count)) => format!(
            "{prefix}there were {} total orders. Growth potential there!",
            format_count(*count)
        ),
        (Intent::SalesByYear, AggregationResult::Breakdown(years)) => {
            format!("{prefix}yearly revenue: {}. Trending up?", ranked_list(years))
        }
        (Intent::ThisMonth, AggregationResult::LatestMonth { period, top }) => match period {
            Some(latest) => format!(
                "For the latest month ({latest}), top products: {}. Fresh insights!",
                ranked_list(top)
            ),
            None => format!("{prefix}there are no sales records to report for the latest month."),
        },
        (Intent::Help, _) => HELP_TEXT.to_string(),
        _ => FALLBACK_TEXT.to_string(),
    }
}

const HELP_TEXT: &str = "I'm your sales AI buddy! Ask about total revenue, top products, \
    sales by country/year, average orders, or top customers. E.g., 'What's revenue in 2004?' \
    or 'Top buyers this month?' What's on your mind?";

const FALLBACK_TEXT: &str = "Hmm, that's a bit unclear - I'm still learning! Try 'total sales', \
    'top products', 'revenue by country', or 'help' for ideas. What's your question about the \
    sales data?";

// Helper functions

fn scope_to_period<'a>(records: &'a [Record], ctx: &FilterContext) -> Vec<&'a Record> {
    match (ctx.year, ctx.month) {
        (Some(year), _) => records
            .iter()
            .filter(|r| r.order_date.year() == year)
            .collect(),
        (None, Some(month)) => records
            .iter()
            .filter(|r| r.order_date.month() == month)
            .collect(),
        (None, None) => records.iter().collect(),
    }
}

fn total_revenue(rows: &[&Record]) -> f64 {
    rows.iter().map(|r| r.revenue).sum()
}

fn distinct_orders(rows: &[&Record]) -> u64 {
    rows.iter()
        .map(|r| r.order_number)
        .collect::<HashSet<_>>()
        .len() as u64
}

/// Sum revenue per group, preserving first-encountered group order.
fn group_revenue<'a, F>(rows: &[&'a Record], key: F) -> Vec<(String, f64)>
where
    F: Fn(&'a Record) -> &'a str,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(String, f64)> = Vec::new();

    for &r in rows {
        let k = key(r);
        match index.get(k) {
            Some(&i) => groups[i].1 += r.revenue,
            None => {
                index.insert(k, groups.len());
                groups.push((k.to_string(), r.revenue));
            }
        }
    }

    groups
}

/// Stable sort keeps tied groups in first-encountered order.
fn top_n(mut groups: Vec<(String, f64)>, n: usize) -> Vec<(String, f64)> {
    groups.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    groups.truncate(n);
    groups
}

fn parse_date_bound(value: &str, field: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%m/%d/%Y"))
        .map_err(|_| warn!(field, value, "unparsable date bound, skipping filter"))
        .ok()
}

fn ranked_list(entries: &[(String, f64)]) -> String {
    entries
        .iter()
        .map(|(label, value)| format!("{label}: {}", format_whole_currency(*value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_currency(value: f64) -> String {
    format!("${}", thousands(&format!("{value:.2}")))
}

fn format_whole_currency(value: f64) -> String {
    format!("${}", thousands(&format!("{value:.0}")))
}

fn format_count(value: u64) -> String {
    thousands(&value.to_string())
}

fn thousands(num: &str) -> String {
    let (int_part, frac) = match num.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (num, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
