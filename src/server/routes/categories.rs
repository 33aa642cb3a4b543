use std::collections::BTreeMap;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::instrument;

use crate::{
    db::{Question, TriviaStore},
    server::{
        error::ApiError,
        pagination::{paginate, Page},
    },
};

use super::{category_map, ApiResponse};

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

#[instrument(skip_all)]
async fn get_categories<S: TriviaStore>(
    State(store): State<S>,
) -> ApiResponse<Json<CategoriesResponse>> {
    let categories = category_map(store.categories().await?);
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

// unknown category is a 400 here, not the 404 used for questions
#[instrument(skip_all, fields(page = page))]
async fn get_category_questions<S: TriviaStore>(
    State(store): State<S>,
    id: Result<Path<i64>, PathRejection>,
    Page(page): Page,
) -> ApiResponse<Json<CategoryQuestionsResponse>> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;
    let category = store.category(id).await?.ok_or(ApiError::BadRequest)?;

    let selection = store.questions_for_category(category.id).await?;
    let total_questions = selection.len();
    tracing::debug!(category = %category.kind, total_questions, "Listing category questions");

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: paginate(selection, page),
        total_questions,
        current_category: category.kind,
    }))
}

pub fn category_router<S: TriviaStore>() -> Router<S> {
    Router::new()
        .route("/categories", get(get_categories::<S>))
        .route("/categories/{id}/questions", get(get_category_questions::<S>))
}
