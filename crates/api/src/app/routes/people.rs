use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, rejection::QueryRejection},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use contractkit_core::PersonId;
use contractkit_models::{FieldViolation, PersonCreate, PersonResponse, PersonUpdate};
use contractkit_parties::{PersonService, PersonServiceError};

use crate::app::errors::ApiError;
use crate::app::extract::ValidatedJson;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

const PERSON_NOT_FOUND: &str = "Person not found";

/// The collection answers with and without a trailing slash.
pub fn router() -> Router {
    Router::new()
        .route("/parties/people", get(list_people).post(create_person))
        .route("/parties/people/", get(list_people).post(create_person))
        .route(
            "/parties/people/:person_id",
            get(get_person).patch(update_person).delete(delete_person),
        )
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    skip: Option<i64>,
    limit: Option<i64>,
}

impl ListParams {
    /// `(skip, limit)` after defaults and bounds checks.
    fn page(&self) -> Result<(usize, usize), ApiError> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);

        let mut violations = Vec::new();
        if skip < 0 {
            violations.push(FieldViolation::new(
                "skip",
                "must be greater than or equal to 0",
                "minimum",
            ));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            violations.push(FieldViolation::new(
                "limit",
                format!("must be between 1 and {MAX_LIMIT}"),
                "range",
            ));
        }
        if !violations.is_empty() {
            return Err(ApiError::from_violations(violations));
        }
        Ok((skip as usize, limit as usize))
    }
}

pub async fn list_people(
    Extension(people): Extension<Arc<dyn PersonService>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<PersonResponse>>, ApiError> {
    let Query(params) = params?;
    let (skip, limit) = params.page()?;
    Ok(Json(people.list_people(skip, limit).await?))
}

pub async fn create_person(
    Extension(people): Extension<Arc<dyn PersonService>>,
    ValidatedJson(body): ValidatedJson<PersonCreate>,
) -> Result<(StatusCode, Json<PersonResponse>), ApiError> {
    let person = people.create_person(body).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

pub async fn get_person(
    Extension(people): Extension<Arc<dyn PersonService>>,
    Path(person_id): Path<String>,
) -> Result<Json<PersonResponse>, ApiError> {
    let id = parse_id(&person_id)?;
    people
        .get_person(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(PERSON_NOT_FOUND))
}

pub async fn update_person(
    Extension(people): Extension<Arc<dyn PersonService>>,
    Path(person_id): Path<String>,
    ValidatedJson(body): ValidatedJson<PersonUpdate>,
) -> Result<Json<PersonResponse>, ApiError> {
    let id = parse_id(&person_id)?;
    match people.update_person(id, body).await {
        Ok(Some(person)) => Ok(Json(person)),
        Ok(None) => Err(ApiError::not_found(PERSON_NOT_FOUND)),
        Err(e @ PersonServiceError::DuplicateEmail) => Err(ApiError::bad_request(e.to_string())),
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_person(
    Extension(people): Extension<Arc<dyn PersonService>>,
    Path(person_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&person_id)?;
    if people.delete_person(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(PERSON_NOT_FOUND))
    }
}

/// Ids that do not parse cannot name a stored person.
fn parse_id(raw: &str) -> Result<PersonId, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found(PERSON_NOT_FOUND))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(skip: Option<i64>, limit: Option<i64>) -> ListParams {
        ListParams { skip, limit }
    }

    #[test]
    fn page_defaults() {
        assert_eq!(params(None, None).page().unwrap(), (0, 100));
    }

    #[test]
    fn page_bounds() {
        assert_eq!(params(Some(5), Some(1000)).page().unwrap(), (5, 1000));
        assert!(params(Some(-1), None).page().is_err());
        assert!(params(None, Some(0)).page().is_err());
        assert!(params(None, Some(1001)).page().is_err());
    }
}
