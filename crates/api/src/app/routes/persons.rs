use std::sync::Arc;

use axum::{Extension, Json, Router, http::StatusCode, routing::post};

use contractkit_models::{PersonSummary, PersonSummaryCreate};
use contractkit_parties::PersonSummaryService;

use crate::app::errors::ApiError;
use crate::app::extract::ValidatedJson;

pub fn router() -> Router {
    Router::new()
        .route("/persons", post(create_person_summary))
        .route("/persons/", post(create_person_summary))
}

pub async fn create_person_summary(
    Extension(summaries): Extension<Arc<dyn PersonSummaryService>>,
    ValidatedJson(body): ValidatedJson<PersonSummaryCreate>,
) -> Result<(StatusCode, Json<PersonSummary>), ApiError> {
    let summary = summaries.create_person_summary(body).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}
