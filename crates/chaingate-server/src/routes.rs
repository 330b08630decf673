//! Route handlers. Each one calls a single connector operation and wraps the
//! payload as `{ "success": true, ..fields, "message": ... }`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use chaingate_core::{Balance, BlockNumber, ChainId, ConnectionStatus, GasPrice};

use crate::error::ApiError;
use crate::AppState;

type ApiResult<T> = Result<Json<Success<T>>, ApiError>;

#[derive(Debug, Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(flatten)]
    data: T,
    message: String,
}

impl<T> Success<T> {
    fn new(data: T, message: String) -> Json<Self> {
        Json(Self {
            success: true,
            data,
            message,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusBody {
    #[serde(flatten)]
    status: ConnectionStatus,
    message: String,
}

pub(crate) async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Welcome to the chaingate Web3 API",
        "version": env!("CARGO_PKG_VERSION"),
        "api_prefix": &*state.api_prefix,
    }))
}

pub(crate) async fn favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

pub(crate) async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello from the chaingate Web3 API!" }))
}

pub(crate) async fn status(State(state): State<AppState>) -> Json<StatusBody> {
    let status = state.connector.status();
    let message = status.message();
    Json(StatusBody { status, message })
}

pub(crate) async fn block_number(State(state): State<AppState>) -> ApiResult<BlockNumber> {
    let data = state.connector.block_number().await?;
    let message = data.message();
    Ok(Success::new(data, message))
}

pub(crate) async fn balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> ApiResult<Balance> {
    let data = state.connector.balance(&address).await?;
    let message = data.message();
    Ok(Success::new(data, message))
}

pub(crate) async fn chain_id(State(state): State<AppState>) -> ApiResult<ChainId> {
    let data = state.connector.chain_id().await?;
    let message = data.message();
    Ok(Success::new(data, message))
}

pub(crate) async fn gas_price(State(state): State<AppState>) -> ApiResult<GasPrice> {
    let data = state.connector.gas_price().await?;
    let message = data.message();
    Ok(Success::new(data, message))
}
