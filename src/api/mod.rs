use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum, error::ErrorKind};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    ANNUAL_RATE_BOUNDS, CalculatorInput, CalculatorState, ChartSlice, DEFAULT_ANNUAL_RATE_PERCENT,
    DEFAULT_MONTHLY_CONTRIBUTION, DEFAULT_YEARS, InputBounds, InvestmentMode,
    MONTHLY_CONTRIBUTION_BOUNDS, YEARS_BOUNDS, format_currency, format_rate, format_years,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliInvestmentMode {
    Sip,
    Lumpsum,
}

impl From<CliInvestmentMode> for InvestmentMode {
    fn from(value: CliInvestmentMode) -> Self {
        match value {
            CliInvestmentMode::Sip => InvestmentMode::Sip,
            CliInvestmentMode::Lumpsum => InvestmentMode::Lumpsum,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiInvestmentMode {
    #[serde(alias = "SIP")]
    Sip,
    #[serde(alias = "Lumpsum", alias = "lump-sum", alias = "lump_sum")]
    Lumpsum,
}

impl From<ApiInvestmentMode> for CliInvestmentMode {
    fn from(value: ApiInvestmentMode) -> Self {
        match value {
            ApiInvestmentMode::Sip => CliInvestmentMode::Sip,
            ApiInvestmentMode::Lumpsum => CliInvestmentMode::Lumpsum,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CalculatePayload {
    monthly_contribution: Option<f64>,
    annual_rate_percent: Option<f64>,
    years: Option<f64>,
    mode: Option<ApiInvestmentMode>,
}

#[derive(Parser, Debug)]
#[command(
    name = "sipcalc",
    about = "SIP calculator: projects monthly contributions with monthly compounding",
    after_help = "Run `sipcalc serve [port]` to start the calculator web page (default port 8080)",
    allow_negative_numbers = true
)]
struct Cli {
    #[arg(
        long,
        default_value_t = DEFAULT_MONTHLY_CONTRIBUTION,
        help = "Monthly investment, clamped to 500..=100000 in steps of 500"
    )]
    monthly_contribution: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_ANNUAL_RATE_PERCENT,
        help = "Expected annual return in percent, clamped to 5..=20 in steps of 0.5"
    )]
    annual_rate: f64,
    #[arg(
        long,
        default_value_t = f64::from(DEFAULT_YEARS),
        help = "Investment period in years, clamped to 1..=30"
    )]
    years: f64,
    #[arg(long, value_enum, default_value_t = CliInvestmentMode::Sip)]
    mode: CliInvestmentMode,
    #[arg(long, help = "Print the JSON response body instead of a text summary")]
    json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BoundsResponse {
    monthly_contribution: InputBounds,
    annual_rate_percent: InputBounds,
    years: InputBounds,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DisplayResponse {
    invested_amount: String,
    estimated_returns: String,
    total_value: String,
    monthly_contribution: String,
    annual_rate: String,
    years: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculateResponse {
    mode: InvestmentMode,
    input: CalculatorInput,
    bounds: BoundsResponse,
    invested_amount: f64,
    estimated_returns: f64,
    total_value: f64,
    display: DisplayResponse,
    chart: Vec<ChartSlice>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_state(cli: &Cli) -> Result<CalculatorState, String> {
    let mut state = CalculatorState::new();
    state
        .set_monthly_contribution(cli.monthly_contribution)
        .map_err(|e| e.to_string())?;
    state
        .set_annual_rate_percent(cli.annual_rate)
        .map_err(|e| e.to_string())?;
    state.set_years(cli.years).map_err(|e| e.to_string())?;
    state.set_mode(cli.mode.into());
    Ok(state)
}

pub fn run_cli<I, T>(args: I) -> Result<String, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    let state =
        build_state(&cli).map_err(|msg| clap::Error::raw(ErrorKind::ValueValidation, msg))?;
    let response = build_calculate_response(&state);

    if cli.json {
        return serde_json::to_string_pretty(&response).map_err(|e| {
            clap::Error::raw(ErrorKind::Io, format!("Failed to serialize response: {e}"))
        });
    }
    Ok(render_summary(&response))
}

fn render_summary(response: &CalculateResponse) -> String {
    let title = match response.mode {
        InvestmentMode::Sip => "SIP",
        InvestmentMode::Lumpsum => "Lumpsum",
    };
    let display = &response.display;
    let rows = [
        ("Monthly investment", &display.monthly_contribution),
        ("Expected return rate (p.a)", &display.annual_rate),
        ("Time period", &display.years),
    ];
    let totals = [
        ("Invested amount", &display.invested_amount),
        ("Est. returns", &display.estimated_returns),
        ("Total value", &display.total_value),
    ];

    let mut out = format!("{title} calculator\n");
    for (label, value) in rows {
        out.push_str(&format!("{label:<28}{value}\n"));
    }
    out.push('\n');
    for (label, value) in totals {
        out.push_str(&format!("{label:<28}{value}\n"));
    }
    for slice in &response.chart {
        out.push_str(&format!(
            "{:<28}{:.1}%\n",
            format!("{} share", slice.label),
            slice.share * 100.0
        ));
    }
    out
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/calculate",
            get(calculate_get_handler).post(calculate_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    info!("SIP calculator HTTP API listening on http://{addr}");
    info!("Local access: http://127.0.0.1:{port}/");

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

async fn calculate_get_handler(
    payload: Result<Query<CalculatePayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => calculate_handler_impl(payload),
        Err(rejection) => rejected_payload(rejection.status(), rejection.body_text()),
    }
}

async fn calculate_post_handler(
    payload: Result<Json<CalculatePayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => calculate_handler_impl(payload),
        Err(rejection) => rejected_payload(rejection.status(), rejection.body_text()),
    }
}

fn rejected_payload(status: StatusCode, msg: String) -> Response {
    warn!("rejected calculation payload: {msg}");
    error_response(status, &msg)
}

fn calculate_handler_impl(payload: CalculatePayload) -> Response {
    let state = match state_from_payload(payload) {
        Ok(state) => state,
        Err(msg) => {
            warn!("rejected calculation request: {msg}");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    let response = build_calculate_response(&state);
    debug!(
        "calculated {:?}: invested={} returns={} total={}",
        response.input, response.invested_amount, response.estimated_returns, response.total_value
    );
    json_response(StatusCode::OK, response)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
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
fn state_from_json(json: &str) -> Result<CalculatorState, String> {
    let payload = serde_json::from_str::<CalculatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    state_from_payload(payload)
}

fn state_from_payload(payload: CalculatePayload) -> Result<CalculatorState, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.monthly_contribution {
        cli.monthly_contribution = v;
    }
    if let Some(v) = payload.annual_rate_percent {
        cli.annual_rate = v;
    }
    if let Some(v) = payload.years {
        cli.years = v;
    }
    if let Some(v) = payload.mode {
        cli.mode = v.into();
    }

    build_state(&cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        monthly_contribution: DEFAULT_MONTHLY_CONTRIBUTION,
        annual_rate: DEFAULT_ANNUAL_RATE_PERCENT,
        years: f64::from(DEFAULT_YEARS),
        mode: CliInvestmentMode::Sip,
        json: true,
    }
}

fn build_calculate_response(state: &CalculatorState) -> CalculateResponse {
    let input = state.input();
    let result = state.result();
    // Shown as contribution * 12 * years; equal to the formula's `n` multiple for integer years.
    let invested_display = input.monthly_contribution * 12.0 * f64::from(input.years);

    CalculateResponse {
        mode: input.mode,
        input,
        bounds: BoundsResponse {
            monthly_contribution: MONTHLY_CONTRIBUTION_BOUNDS,
            annual_rate_percent: ANNUAL_RATE_BOUNDS,
            years: YEARS_BOUNDS,
        },
        invested_amount: result.invested_amount,
        estimated_returns: result.estimated_returns,
        total_value: result.total_value,
        display: DisplayResponse {
            invested_amount: format_currency(invested_display),
            estimated_returns: format_currency(result.estimated_returns),
            total_value: format_currency(result.total_value),
            monthly_contribution: format_currency(input.monthly_contribution),
            annual_rate: format_rate(input.annual_rate_percent),
            years: format_years(input.years),
        },
        chart: state.breakdown().to_vec(),
    }
}
