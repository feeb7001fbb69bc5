//! Prompt template handlers

use crate::handlers::{invalid_body, AppState};
use crate::prompts::{PromptBuilder, PromptTemplate};
use crate::utils::error::AppResult;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Registered templates
#[derive(Debug, Serialize, Deserialize)]
pub struct TemplateListResponse {
    pub templates: Vec<PromptTemplate>,
}

/// Variables to substitute into a template
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RenderTemplateRequest {
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderTemplateResponse {
    pub template_id: String,
    pub prompt: String,
}

/// GET /api/templates
pub async fn list_templates(State(state): State<Arc<AppState>>) -> Json<TemplateListResponse> {
    Json(TemplateListResponse {
        templates: state.templates.list().to_vec(),
    })
}

/// Render a template into a prompt
///
/// POST /api/templates/:id/render
pub async fn render_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<RenderTemplateRequest>, JsonRejection>,
) -> AppResult<Json<RenderTemplateResponse>> {
    let Json(request) = payload.map_err(invalid_body)?;
    debug!("Rendering template '{}' with {} variables", id, request.variables.len());

    let prompt = PromptBuilder::new(&state.templates, &id)?
        .set_many(request.variables)
        .build()?;

    Ok(Json(RenderTemplateResponse { template_id: id, prompt }))
}
