//! Direct filename analysis over HTTP

use axum::{extract::Query, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;

use crate::services::analyzer::FileAnalyzer;
use crate::services::metrics;

/// Query params for analysis
#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    pub filename: Option<String>,
}

/// JSON body alternative to the query param
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub filename: String,
}

/// POST /api/analyze-file?filename=... - Analyze a filename and return the structured result
///
/// The query parameter wins when both it and a JSON body are present.
pub async fn analyze_file(
    Query(query): Query<AnalyzeQuery>,
    body: Option<Json<AnalyzeRequest>>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let filename = query
        .filename
        .or_else(|| body.map(|Json(req)| req.filename))
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "filename is required" })),
            )
        })?;

    let analysis = FileAnalyzer::analyze(&filename);
    metrics::record_analysis("api");

    tracing::debug!("API analysis of '{}': {}", filename, analysis.file_type);

    Ok(Json(analysis))
}
