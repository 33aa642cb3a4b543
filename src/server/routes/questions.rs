use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use serde_json::Value;
use tracing::instrument;

use crate::{
    db::{NewQuestion, Question, TriviaStore},
    server::{
        error::{ApiError, ProcessingError},
        pagination::{last_page, paginate, Page},
    },
    telemetry::QUESTION_CHANGES_CNTR,
};

use super::{category_map, ApiResponse};

#[derive(Deserialize)]
struct QuestionPayload {
    question: String,
    answer: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    category: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
}

impl From<QuestionPayload> for NewQuestion {
    fn from(payload: QuestionPayload) -> Self {
        NewQuestion {
            question: payload.question,
            answer: payload.answer,
            category: payload.category,
            difficulty: payload.difficulty,
        }
    }
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct CreatedQuestion {
    success: bool,
    created: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct DeletedQuestion {
    success: bool,
    deleted: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

/// Either search results or the page holding a freshly created question.
#[derive(Serialize)]
#[serde(untagged)]
enum PostQuestionsResponse {
    Search(SearchResults),
    Created(CreatedQuestion),
}

#[instrument(skip_all, fields(page = page))]
async fn questions_page<S: TriviaStore>(
    State(store): State<S>,
    Page(page): Page,
) -> ApiResponse<Json<QuestionsPage>> {
    let selection = store.questions().await?;
    let total_questions = selection.len();
    let questions = paginate(selection, page);
    let categories = category_map(store.categories().await?);

    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsPage {
        success: true,
        questions,
        total_questions,
        categories,
    }))
}

/// `POST /questions` searches when the body carries a non-empty `searchTerm`
/// and creates a question otherwise.
#[instrument(skip_all, fields(page = page))]
async fn search_or_create<S: TriviaStore>(
    State(store): State<S>,
    Page(page): Page,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse<Json<PostQuestionsResponse>> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "Unreadable questions body");
        ApiError::BadRequest
    })?;

    let response = match search_term(&body) {
        Some(term) => PostQuestionsResponse::Search(search(&store, &term, page).await?),
        None => PostQuestionsResponse::Created(create(&store, body).await?),
    };
    Ok(Json(response))
}

/// A non-empty string, or a non-zero number searched by its decimal text.
fn search_term(body: &Value) -> Option<String> {
    match body.get("searchTerm")? {
        Value::String(term) if !term.is_empty() => Some(term.clone()),
        Value::Number(term) if term.as_f64() != Some(0.0) => Some(term.to_string()),
        _ => None,
    }
}

async fn search<S: TriviaStore>(store: &S, term: &str, page: i64) -> ApiResponse<SearchResults> {
    let selection = store.search_questions(term).await?;
    if selection.is_empty() {
        return Err(ApiError::NotFound);
    }
    let total_questions = selection.len();
    tracing::info!(term, total_questions, "Search matched questions");

    Ok(SearchResults {
        success: true,
        questions: paginate(selection, page),
        total_questions,
    })
}

async fn create<S: TriviaStore>(store: &S, body: Value) -> Result<CreatedQuestion, ProcessingError> {
    let payload: QuestionPayload =
        serde_json::from_value(body).map_err(|e| ProcessingError::Validation(e.to_string()))?;
    let new_question = NewQuestion::from(payload);

    let created = store.create_question(&new_question).await?;
    QUESTION_CHANGES_CNTR.with_label_values(&["created"]).inc();

    let selection = store.questions().await?;
    let total_questions = selection.len();
    tracing::info!(id = created, category = new_question.category, "Question created");

    Ok(CreatedQuestion {
        success: true,
        created,
        questions: paginate(selection, last_page(total_questions)),
        total_questions,
    })
}

#[instrument(skip_all, fields(page = page))]
async fn delete_question<S: TriviaStore>(
    State(store): State<S>,
    id: Result<Path<i64>, PathRejection>,
    Page(page): Page,
) -> ApiResponse<Json<DeletedQuestion>> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;

    let question = store
        .question(id)
        .await
        .map_err(ProcessingError::from)?
        .ok_or(ApiError::NotFound)?;

    store
        .delete_question(question.id)
        .await
        .map_err(ProcessingError::from)?;
    QUESTION_CHANGES_CNTR.with_label_values(&["deleted"]).inc();
    tracing::info!(id, "Question deleted");

    let selection = store.questions().await.map_err(ProcessingError::from)?;
    let total_questions = selection.len();

    Ok(Json(DeletedQuestion {
        success: true,
        deleted: id,
        questions: paginate(selection, page),
        total_questions,
    }))
}

pub fn questions_router<S: TriviaStore>() -> Router<S> {
    Router::new()
        .route(
            "/questions",
            get(questions_page::<S>).post(search_or_create::<S>),
        )
        .route("/questions/{id}", delete(delete_question::<S>))
}
