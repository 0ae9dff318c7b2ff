use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

mod analysis;
mod ingest;
mod intent;
mod models;

use analysis::FilterContext;
use models::{ChartSeries, ChatQuery, ChatResponse, FilterQuery, KpiSummary, Record};

/// Sales insight HTTP API.
/// The dataset is loaded once at startup and shared read-only across
/// requests; every handler threads it into pure engine calls.
#[derive(Clone)]
struct AppState {
    dataset: Arc<Vec<Record>>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("sales_insight_api=info")
        .init();

    let data_path = std::env::var("SALES_DATA_PATH")
        .unwrap_or_else(|_| "sales_data_sample.csv".to_string());
    let dataset = ingest::load_dataset(&data_path)?;

    let state = AppState {
        dataset: Arc::new(dataset),
    };

    let app = create_router(state);

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/kpis", get(get_kpis))
        .route("/monthly-sales", get(get_monthly_sales))
        .route("/top-products", get(get_top_products))
        .route("/top-product-lines", get(get_top_product_lines))
        .route("/revenue-by-country", get(get_revenue_by_country))
        .route("/filtered-data", post(get_filtered_data))
        .route("/chat", post(chat))
        // CORS for the React frontend
        .layer(
            ServiceBuilder::new().layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

async fn root() -> &'static str {
    "E-commerce Sales API v0.1.0"
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn get_kpis(State(state): State<AppState>) -> Json<KpiSummary> {
    Json(analysis::kpis(&state.dataset))
}

async fn get_monthly_sales(State(state): State<AppState>) -> Json<ChartSeries> {
    let monthly = analysis::monthly_revenue(&state.dataset);
    Json(series(
        monthly
            .into_iter()
            .map(|(period, value)| (period.to_string(), value))
            .collect(),
    ))
}

async fn get_top_products(State(state): State<AppState>) -> Json<ChartSeries> {
    Json(series(analysis::ranked_revenue(
        &state.dataset,
        |r| r.product_code.as_str(),
        10,
    )))
}

async fn get_top_product_lines(State(state): State<AppState>) -> Json<ChartSeries> {
    Json(series(analysis::ranked_revenue(
        &state.dataset,
        |r| r.product_line.as_str(),
        5,
    )))
}

async fn get_revenue_by_country(State(state): State<AppState>) -> Json<ChartSeries> {
    Json(series(analysis::ranked_revenue(
        &state.dataset,
        |r| r.country.as_str(),
        usize::MAX,
    )))
}

/// KPIs over the structurally filtered dataset
async fn get_filtered_data(
    State(state): State<AppState>,
    Json(filters): Json<FilterQuery>,
) -> Json<KpiSummary> {
    let filtered = analysis::apply_filters(
        &state.dataset,
        filters.date_start.as_deref(),
        filters.date_end.as_deref(),
        filters.product_line.as_deref(),
        filters.country.as_deref(),
    );
    Json(analysis::kpis(&filtered))
}

/// Conversational path: classify, extract the period, aggregate, compose
async fn chat(
    State(state): State<AppState>,
    Json(input): Json<ChatQuery>,
) -> Json<ChatResponse> {
    let intent = intent::classify(&input.query);
    let period = intent::extract_period(&input.query);
    let ctx = FilterContext::from_period(period);

    let result = analysis::aggregate(&state.dataset, intent, &ctx);
    let response = analysis::compose(intent, &result, &ctx);
    info!(?intent, "chat query handled");

    Json(ChatResponse { response })
}

fn series(entries: Vec<(String, f64)>) -> ChartSeries {
    let (labels, values) = entries.into_iter().unzip();
    ChartSeries { labels, values }
}
