//! Summarize and ask handlers

use axum::{extract::State, Json};
use ytsum_common::api::{
    AskRequest, AskResponse, ResponseStatus, SummarizeRequest, SummarizeResponse,
};

use crate::api::extract::JsonBody;
use crate::error::ApiResult;
use crate::AppState;

/// POST /api/summarize
///
/// 200 with the summary and echoed URL; 400 invalid body/URL; 429 quota
/// exceeded; 500 when no client is configured or the service fails.
pub async fn summarize(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SummarizeRequest>,
) -> ApiResult<Json<SummarizeResponse>> {
    let outcome = state
        .summarizer
        .summarize(req.url.as_deref(), req.prompt.as_deref())
        .await?;

    Ok(Json(SummarizeResponse {
        status: ResponseStatus::Success,
        summary: outcome.summary,
        url: outcome.url,
    }))
}

/// POST /api/ask
///
/// Free-form prompt, same error mapping as `/api/summarize`.
pub async fn ask(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AskRequest>,
) -> ApiResult<Json<AskResponse>> {
    let response = state.summarizer.ask(req.prompt.as_deref()).await?;

    Ok(Json(AskResponse {
        status: ResponseStatus::Success,
        response,
    }))
}
