use axum::{
    Form, Router,
    extract::{FromRef, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::cookie::Key;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::calc::divisors::{self, DivisorFunction};
use crate::calc::input::{parse_int, parse_int_list, parse_number};
use crate::calc::logarithm::{self, LogFunction};
use crate::calc::trig::{self, AngleUnit, TrigFunction};
use crate::calc::{quadratic, stats};
use crate::config::Config;
use crate::error::CalcError;
use crate::login::{self, AuthService, Visitor};
use crate::store::UserStore;
use crate::views::Views;

/// Shared, cheaply cloneable application state
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub views: Arc<Views>,
    pub key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

impl AppState {
    pub fn new(auth: AuthService, views: Views, key: Key) -> Self {
        AppState {
            auth,
            views: Arc::new(views),
            key,
        }
    }

    /// Open the database, compile the templates and derive the cookie key
    pub async fn from_config(config: &Config) -> Result<Self, CalcError> {
        let store = UserStore::connect(&config.database_url).await?;
        let auth = AuthService::new(store)?;
        Ok(AppState::new(auth, Views::new()?, config.session_key()?))
    }
}

#[derive(Deserialize)]
struct TrigForm {
    #[serde(rename = "fn", default)]
    function: String,
    #[serde(default)]
    x: String,
    #[serde(default)]
    unit: String,
}

#[derive(Deserialize)]
struct LogForm {
    #[serde(rename = "fn", default)]
    function: String,
    #[serde(default)]
    x: String,
    #[serde(default)]
    base: String,
}

#[derive(Deserialize)]
struct DivisorForm {
    #[serde(rename = "fn", default)]
    function: String,
    #[serde(default)]
    x: String,
}

#[derive(Deserialize)]
struct QuadraticForm {
    #[serde(default)]
    a: String,
    #[serde(default)]
    b: String,
    #[serde(default)]
    c: String,
}

#[derive(Deserialize)]
struct StatsForm {
    #[serde(default)]
    x: String,
}

/// Build the router with every page and form handler
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route(
            "/login",
            get(login::serve_login_page).post(login::handle_login),
        )
        .route("/logout", get(login::handle_logout))
        .route(
            "/register",
            get(login::serve_register_page).post(login::handle_register),
        )
        .route("/trigo", get(serve_trigo).post(handle_trigo))
        .route("/logln", get(serve_logln).post(handle_logln))
        .route("/hcflcm", get(serve_hcflcm).post(handle_hcflcm))
        .route("/qe", get(serve_qe).post(handle_qe))
        .route("/stats", get(serve_stats).post(handle_stats))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Using database {}", config.database_url);
    let state = AppState::from_config(&config).await?;
    let app = router(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    log::info!("Listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// `302 Found` to `location`
pub fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Render a calculator page with either its result fields or the error
/// message that stopped the computation
fn calculator_page(
    state: &AppState,
    name: &str,
    visitor: &Visitor,
    outcome: Result<Value, CalcError>,
) -> Response {
    match outcome {
        Ok(body) => state.views.page(name, visitor.user.as_ref(), body),
        Err(e) if e.is_user_facing() => state.views.page(
            name,
            visitor.user.as_ref(),
            json!({ "error": e.to_string() }),
        ),
        Err(e) => e.into_response(),
    }
}

async fn serve_index(State(state): State<AppState>, visitor: Visitor) -> Response {
    state.views.page("index", visitor.user.as_ref(), json!({}))
}

async fn serve_trigo(State(state): State<AppState>, visitor: Visitor) -> Response {
    state.views.page("trigo", visitor.user.as_ref(), json!({}))
}

fn compute_trigo(form: &TrigForm) -> Result<Value, CalcError> {
    let function: TrigFunction = form.function.parse()?;
    let angle = parse_number("x", &form.x)?;
    let res = trig::evaluate(function, angle, AngleUnit::from_form(&form.unit))?;
    Ok(json!({ "res": res, "solved": true }))
}

async fn handle_trigo(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(form): Form<TrigForm>,
) -> Response {
    calculator_page(&state, "trigo", &visitor, compute_trigo(&form))
}

async fn serve_logln(State(state): State<AppState>, visitor: Visitor) -> Response {
    state.views.page("logln", visitor.user.as_ref(), json!({}))
}

fn compute_logln(form: &LogForm) -> Result<Value, CalcError> {
    let function: LogFunction = form.function.parse()?;
    let x = parse_number("x", &form.x)?;
    let base = match function {
        LogFunction::Log => parse_number("base", &form.base)?,
        // ln never looks at the base
        LogFunction::Ln => std::f64::consts::E,
    };
    let res = logarithm::evaluate(function, x, base)?;
    Ok(json!({ "res": res, "solved": true }))
}

async fn handle_logln(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(form): Form<LogForm>,
) -> Response {
    calculator_page(&state, "logln", &visitor, compute_logln(&form))
}

async fn serve_hcflcm(State(state): State<AppState>, visitor: Visitor) -> Response {
    state.views.page("hcflcm", visitor.user.as_ref(), json!({}))
}

fn compute_hcflcm(form: &DivisorForm) -> Result<Value, CalcError> {
    let function: DivisorFunction = form.function.parse()?;
    let values = parse_int_list(&form.x)?;
    let res = divisors::evaluate(function, &values)?;
    Ok(json!({ "res": res, "solved": true }))
}

async fn handle_hcflcm(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(form): Form<DivisorForm>,
) -> Response {
    calculator_page(&state, "hcflcm", &visitor, compute_hcflcm(&form))
}

async fn serve_qe(State(state): State<AppState>, visitor: Visitor) -> Response {
    state.views.page("qe", visitor.user.as_ref(), json!({}))
}

fn compute_qe(form: &QuadraticForm) -> Result<Value, CalcError> {
    let a = parse_int("a", &form.a)?;
    let b = parse_int("b", &form.b)?;
    let c = parse_int("c", &form.c)?;
    let roots = quadratic::solve(a, b, c)?;
    Ok(json!({
        "x1": roots.x1,
        "x2": roots.x2,
        "e1": roots.e1,
        "e2": roots.e2,
        "eb": roots.eb,
        "solved": true,
    }))
}

async fn handle_qe(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(form): Form<QuadraticForm>,
) -> Response {
    calculator_page(&state, "qe", &visitor, compute_qe(&form))
}

async fn serve_stats(State(state): State<AppState>, visitor: Visitor) -> Response {
    state.views.page("stats", visitor.user.as_ref(), json!({}))
}

fn compute_stats(form: &StatsForm) -> Result<Value, CalcError> {
    let values = parse_int_list(&form.x)?;
    let summary = stats::summarize(&values)?;
    Ok(json!({ "summary": summary }))
}

async fn handle_stats(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(form): Form<StatsForm>,
) -> Response {
    calculator_page(&state, "stats", &visitor, compute_stats(&form))
}
