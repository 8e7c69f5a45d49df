// ABOUTME: Recipe HTTP routes under /v1: CRUD, rating appends, listing, and search
// ABOUTME: Thin handlers that parse input, clamp pagination, and delegate to RecipeService
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recipe routes
//!
//! | Method             | Path                        | Success |
//! |--------------------|-----------------------------|---------|
//! | GET                | `/v1/recipes`               | 200     |
//! | POST               | `/v1/recipes`               | 201     |
//! | GET                | `/v1/recipes/:id`           | 200     |
//! | PUT, PATCH         | `/v1/recipes/:id`           | 200     |
//! | DELETE             | `/v1/recipes/:id`           | 200     |
//! | POST               | `/v1/recipes/:id/rating`    | 201     |
//! | POST               | `/v1/recipes/search`        | 200     |
//!
//! Pagination parameters (`start`, `count`) are read from the query string,
//! or from a url-encoded form body on search. Values that are not integers
//! are treated as absent.

use crate::constants::recipes::DEFAULT_MAX_PREP_TIME;
use crate::errors::{AppError, AppResult};
use crate::models::{NewRecipe, Recipe, RecipeFields, RecipeId, RecipeRated, RecipeRating};
use crate::pagination::PageRequest;
use crate::resources::ServerResources;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Message returned for any body that does not decode
const INVALID_PAYLOAD: &str = "Invalid request payload";

/// Pagination and search parameters, all optional and parsed leniently
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Offset of the first recipe
    pub start: Option<String>,
    /// Page size
    pub count: Option<String>,
    /// Exclusive upper bound on preparation time
    pub preptime: Option<String>,
}

impl SearchParams {
    /// Clamped page request; non-integer values count as absent
    #[must_use]
    pub fn page(&self) -> PageRequest {
        PageRequest::clamped(
            lenient_int(self.start.as_deref()),
            lenient_int(self.count.as_deref()),
        )
    }

    /// Preparation-time bound, the large default when none was given
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a non-empty value is not a number
    pub fn max_prep_time(&self) -> AppResult<f32> {
        match self.preptime.as_deref().map(str::trim) {
            None | Some("") => Ok(DEFAULT_MAX_PREP_TIME),
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::invalid_input(format!("Invalid preptime '{raw}'"))),
        }
    }

    /// Fill unset values from `fallback`
    fn or(self, fallback: Self) -> Self {
        Self {
            start: self.start.or(fallback.start),
            count: self.count.or(fallback.count),
            preptime: self.preptime.or(fallback.preptime),
        }
    }
}

fn lenient_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse().ok())
}

/// Body of a rating request; the recipe comes from the path
#[derive(Debug, Deserialize)]
pub struct RatingPayload {
    /// Rating value
    pub rating: i32,
}

/// Recipe routes implementation
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/v1/recipes",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/v1/recipes/search", post(Self::handle_search))
            .route(
                "/v1/recipes/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .patch(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route("/v1/recipes/:id/rating", post(Self::handle_rate))
            .with_state(resources)
    }

    /// Unwrap a JSON body, answering 400 with the standard message on failure
    fn payload<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
        payload.map(|Json(body)| body).map_err(|rejection| {
            debug!("Rejected request body: {}", rejection.body_text());
            AppError::invalid_input(INVALID_PAYLOAD)
        })
    }

    fn recipe_id(raw: &str) -> AppResult<RecipeId> {
        raw.parse()
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<SearchParams>,
    ) -> AppResult<Json<Vec<Recipe>>> {
        let page = params.page();
        let recipes = resources.recipes.list(page.start, page.count).await?;
        Ok(Json(recipes))
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<NewRecipe>, JsonRejection>,
    ) -> AppResult<(StatusCode, Json<Recipe>)> {
        let recipe = resources.recipes.create(Self::payload(payload)?).await?;
        Ok((StatusCode::CREATED, Json(recipe)))
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> AppResult<Json<Recipe>> {
        let recipe = resources.recipes.get(Self::recipe_id(&id)?).await?;
        Ok(Json(recipe))
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        payload: Result<Json<RecipeFields>, JsonRejection>,
    ) -> AppResult<Json<Recipe>> {
        let id = Self::recipe_id(&id)?;
        let recipe = resources
            .recipes
            .update(id, Self::payload(payload)?)
            .await?;
        Ok(Json(recipe))
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> AppResult<Json<serde_json::Value>> {
        resources.recipes.delete(Self::recipe_id(&id)?).await?;
        Ok(Json(serde_json::json!({ "result": "success" })))
    }

    async fn handle_rate(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        payload: Result<Json<RatingPayload>, JsonRejection>,
    ) -> AppResult<(StatusCode, Json<RecipeRating>)> {
        let recipe_id = Self::recipe_id(&id)?;
        let RatingPayload { rating } = Self::payload(payload)?;
        let rated = resources.recipes.add_rating(recipe_id, rating).await?;
        Ok((StatusCode::CREATED, Json(rated)))
    }

    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<SearchParams>,
        form: Option<Form<SearchParams>>,
    ) -> AppResult<Json<Vec<RecipeRated>>> {
        let params = match form {
            Some(Form(body)) => body.or(query),
            None => query,
        };
        let page = params.page();
        let results = resources
            .recipes
            .search_by_prep_time(page.start, page.count, params.max_prep_time()?)
            .await?;
        Ok(Json(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(start: Option<&str>, count: Option<&str>, preptime: Option<&str>) -> SearchParams {
        SearchParams {
            start: start.map(str::to_owned),
            count: count.map(str::to_owned),
            preptime: preptime.map(str::to_owned),
        }
    }

    #[test]
    fn test_non_numeric_pagination_counts_as_absent() {
        let page = params(Some("abc"), Some("x"), None).page();
        assert_eq!(page, PageRequest::new(0, 10));
    }

    #[test]
    fn test_pagination_is_clamped() {
        let page = params(Some("-3"), Some("50"), None).page();
        assert_eq!(page, PageRequest::new(0, 10));

        let page = params(Some("4"), Some("2"), None).page();
        assert_eq!(page, PageRequest::new(4, 2));
    }

    #[test]
    fn test_prep_time_default_and_parse() {
        let bound = |raw: Option<&str>| params(None, None, raw).max_prep_time();

        assert_eq!(bound(None).unwrap().to_bits(), 9999.99_f32.to_bits());
        assert_eq!(bound(Some("")).unwrap().to_bits(), 9999.99_f32.to_bits());
        assert_eq!(bound(Some("50.0")).unwrap().to_bits(), 50.0_f32.to_bits());
        assert!(bound(Some("soon")).is_err());
    }

    #[test]
    fn test_form_values_take_precedence() {
        let merged = params(Some("1"), None, None).or(params(Some("5"), Some("3"), Some("30")));
        assert_eq!(merged.start.as_deref(), Some("1"));
        assert_eq!(merged.count.as_deref(), Some("3"));
        assert_eq!(merged.preptime.as_deref(), Some("30"));
    }
}
