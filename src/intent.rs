use strsim::normalized_levenshtein;

/// Analytical questions the engine can answer.
/// `Unknown` is the fallback for anything the catalog does not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    TotalRevenue,
    TopProducts,
    TopCustomers,
    RevenueByCountry,
    RevenueByProductLine,
    AverageOrder,
    OrdersCount,
    SalesByYear,
    ThisMonth,
    Help,
    Unknown,
}

/// Minimum similarity for a phrase to count as a match.
/// Calibrated against the catalog for normalized Levenshtein; other
/// similarity measures would need a different cutoff.
const MATCH_THRESHOLD: f64 = 0.6;

/// Catalog order is the tie-break: the first intent whose best phrase
/// clears the threshold wins, regardless of later scores.
const INTENT_CATALOG: &[(Intent, &[&str])] = &[
    (
        Intent::TotalRevenue,
        &[
            "total revenue",
            "overall sales",
            "total sales",
            "how much money",
            "gross revenue",
        ],
    ),
    (
        Intent::TopProducts,
        &[
            "top products",
            "best selling products",
            "popular items",
            "highest revenue products",
        ],
    ),
    (
        Intent::TopCustomers,
        &[
            "top customers",
            "best customers",
            "highest spending customers",
            "top buyers",
        ],
    ),
    (
        Intent::RevenueByCountry,
        &[
            "revenue by country",
            "sales by country",
            "where most sales",
            "country breakdown",
        ],
    ),
    (
        Intent::RevenueByProductLine,
        &[
            "sales by product line",
            "revenue by category",
            "product line performance",
        ],
    ),
    (
        Intent::AverageOrder,
        &["average order value", "avg order", "typical order size"],
    ),
    (
        Intent::OrdersCount,
        &["total orders", "number of orders", "how many orders"],
    ),
    (
        Intent::SalesByYear,
        &["sales by year", "yearly revenue", "annual sales"],
    ),
    (
        Intent::ThisMonth,
        &["this month", "current month sales", "latest month"],
    ),
    (Intent::Help, &["help", "what can you do", "examples"]),
];

/// Classify free-form query text against the phrase catalog.
/// Always returns a value; unmatched input maps to `Intent::Unknown`.
pub fn classify(text: &str) -> Intent {
    let normalized = text
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    for (intent, phrases) in INTENT_CATALOG {
        let best = phrases
            .iter()
            .map(|phrase| normalized_levenshtein(&normalized, phrase))
            .fold(0.0, f64::max);

        if best >= MATCH_THRESHOLD {
            return *intent;
        }
    }

    Intent::Unknown
}

/// Year or month narrowing pulled out of query text.
/// Year and month are mutually exclusive; year wins when both appear.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PeriodFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Years covered by the sales dataset; 4-digit tokens outside this
/// range are not treated as year filters.
pub const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 2003..=2005;

const MONTH_ABBREVS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Extract an optional year or month from query text.
/// Single left-to-right pass; only the first token of each kind counts.
pub fn extract_period(text: &str) -> PeriodFilter {
    let lower = text.to_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    for token in &tokens {
        if token.len() == 4 && token.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(year) = token.parse::<i32>() {
                if SUPPORTED_YEARS.contains(&year) {
                    return PeriodFilter {
                        year: Some(year),
                        month: None,
                    };
                }
            }
        }
    }

    for token in &tokens {
        if let Some(idx) = MONTH_ABBREVS.iter().position(|m| m == token) {
            return PeriodFilter {
                year: None,
                month: Some(idx as u32 + 1),
            };
        }
    }

    PeriodFilter::default()
}

/// Capitalized display form for an extracted month ("Oct").
pub fn month_abbrev(month: u32) -> &'static str {
    const DISPLAY: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    DISPLAY[(month.clamp(1, 12) - 1) as usize]
}
