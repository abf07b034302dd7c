use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    ChartSeries, ChartView, ProjectionError, ScenarioParams, chart_series, compute,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ApiChartView {
    Nominal,
    #[serde(
        alias = "inflationAdjusted",
        alias = "inflation_adjusted",
        alias = "real"
    )]
    InflationAdjusted,
}

impl From<ApiChartView> for ChartView {
    fn from(value: ApiChartView) -> Self {
        match value {
            ApiChartView::Nominal => ChartView::Nominal,
            ApiChartView::InflationAdjusted => ChartView::InflationAdjusted,
        }
    }
}

impl From<ChartView> for ApiChartView {
    fn from(value: ChartView) -> Self {
        match value {
            ChartView::Nominal => ApiChartView::Nominal,
            ChartView::InflationAdjusted => ApiChartView::InflationAdjusted,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    base_amount: Option<f64>,
    inflation_rate1: Option<f64>,
    inflation_rate2: Option<f64>,
    inflation_rate3: Option<f64>,
    initial_investment: Option<f64>,
    duration_years: Option<u32>,
    return_rate: Option<f64>,
    monthly_withdrawal: Option<f64>,
    view: Option<ApiChartView>,
}

#[derive(Parser, Debug)]
#[command(
    name = "drawdown",
    about = "Inflation erosion vs investment drawdown projection dashboard"
)]
struct Cli {
    #[arg(
        long,
        default_value_t = 1_000_000.0,
        help = "Base amount whose purchasing power is tracked"
    )]
    base_amount: f64,
    #[arg(long, default_value_t = 4.0, help = "First inflation rate in percent")]
    inflation_rate_1: f64,
    #[arg(long, default_value_t = 6.0, help = "Second inflation rate in percent")]
    inflation_rate_2: f64,
    #[arg(long, default_value_t = 8.0, help = "Third inflation rate in percent")]
    inflation_rate_3: f64,
    #[arg(
        long,
        default_value_t = 1_000_000.0,
        help = "Investment balance at year zero"
    )]
    initial_investment: f64,
    #[arg(long, default_value_t = 20, help = "Projection horizon in years")]
    duration_years: u32,
    #[arg(
        long,
        default_value_t = 10.0,
        help = "Expected annual return in percent"
    )]
    return_rate: f64,
    #[arg(
        long,
        default_value_t = 10_000.0,
        help = "Monthly withdrawal, deducted as an annualized lump after each year's growth"
    )]
    monthly_withdrawal: f64,
}

#[derive(Debug)]
struct ApiRequest {
    params: ScenarioParams,
    view: ChartView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    view: ApiChartView,
    base_amount: f64,
    inflation_rates: Vec<f64>,
    initial_investment: f64,
    duration_years: u32,
    return_rate: f64,
    monthly_withdrawal: f64,
    years: Vec<u32>,
    series: Vec<ChartSeries>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_params(cli: Cli) -> ScenarioParams {
    ScenarioParams {
        base_amount: cli.base_amount,
        inflation_rates: vec![
            cli.inflation_rate_1,
            cli.inflation_rate_2,
            cli.inflation_rate_3,
        ],
        initial_investment: cli.initial_investment,
        duration_years: cli.duration_years,
        return_rate: cli.return_rate,
        monthly_withdrawal: cli.monthly_withdrawal,
    }
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("drawdown dashboard listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_handler_impl(payload: ProjectPayload) -> Response {
    let request = api_request_from_payload(payload);

    match compute(&request.params) {
        Ok(result) => {
            let series = chart_series(&request.params, &result, request.view);
            let response = ProjectResponse {
                view: request.view.into(),
                base_amount: request.params.base_amount,
                inflation_rates: request.params.inflation_rates.clone(),
                initial_investment: request.params.initial_investment,
                duration_years: request.params.duration_years,
                return_rate: request.params.return_rate,
                monthly_withdrawal: request.params.monthly_withdrawal,
                years: result.years,
                series,
            };
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            log::warn!("projection rejected: {err}");
            error_response(error_status(&err), &err.to_string())
        }
    }
}

fn error_status(err: &ProjectionError) -> StatusCode {
    match err {
        ProjectionError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ProjectionError::NumericDegeneracy { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    Ok(api_request_from_payload(payload))
}

fn api_request_from_payload(payload: ProjectPayload) -> ApiRequest {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.base_amount {
        cli.base_amount = v;
    }
    if let Some(v) = payload.inflation_rate1 {
        cli.inflation_rate_1 = v;
    }
    if let Some(v) = payload.inflation_rate2 {
        cli.inflation_rate_2 = v;
    }
    if let Some(v) = payload.inflation_rate3 {
        cli.inflation_rate_3 = v;
    }
    if let Some(v) = payload.initial_investment {
        cli.initial_investment = v;
    }
    if let Some(v) = payload.duration_years {
        cli.duration_years = v;
    }
    if let Some(v) = payload.return_rate {
        cli.return_rate = v;
    }
    if let Some(v) = payload.monthly_withdrawal {
        cli.monthly_withdrawal = v;
    }

    let view = payload
        .view
        .map(ChartView::from)
        .unwrap_or(ChartView::InflationAdjusted);

    ApiRequest {
        params: build_params(cli),
        view,
    }
}

fn default_cli_for_api() -> Cli {
    Cli {
        base_amount: 1_000_000.0,
        inflation_rate_1: 4.0,
        inflation_rate_2: 6.0,
        inflation_rate_3: 8.0,
        initial_investment: 1_000_000.0,
        duration_years: 20,
        return_rate: 10.0,
        monthly_withdrawal: 10_000.0,
    }
}
