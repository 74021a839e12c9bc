//! MisBot chat route

use crate::gemini::{self, Turn};
use crate::{ApiResult, AppState};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct QueryInput {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<Turn>,
}

#[derive(Serialize)]
pub struct ChatReply {
    pub result: String,
}

pub async fn misbot(
    State(state): State<Arc<AppState>>,
    Json(input): Json<QueryInput>,
) -> ApiResult<Json<ChatReply>> {
    let result = gemini::generate(
        &state.http,
        &state.config,
        &input.message,
        &input.conversation_history,
    )
    .await?;

    Ok(Json(ChatReply { result }))
}
