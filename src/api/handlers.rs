// HTTP request handlers.

use actix_web::{web, HttpResponse, Result};

use crate::pipeline::Pipeline;

pub const DEFAULT_LANG: &str = "english";

/// Shared application state: one pipeline, one cache, for the process.
pub struct AppState {
    pub pipeline: Pipeline,
}

pub async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

pub async fn aggregate(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let steamid = path.into_inner();
    respond(&state, &steamid, DEFAULT_LANG).await
}

pub async fn aggregate_with_lang(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (steamid, lang) = path.into_inner();
    respond(&state, &steamid, &lang).await
}

/// Runs the pipeline and returns its result as the response body. Failures
/// are expressed through the body's `code`/`status` fields; the HTTP status
/// stays 200 so clients branch on one place only.
async fn respond(state: &AppState, steamid: &str, lang: &str) -> Result<HttpResponse> {
    let result = state.pipeline.run(steamid, lang).await;
    if !result.status {
        tracing::warn!(
            steamid,
            code = result.code.as_i32(),
            message = %result.message(),
            "aggregation returned failure"
        );
    }
    Ok(HttpResponse::Ok().json(result))
}
