use actix_web::{web, HttpResponse, Result};

use crate::api_error::ApiError;
use crate::http::AppState;

pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "games": state.games.len(),
    })))
}
