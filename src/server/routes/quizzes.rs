use std::collections::HashSet;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use tracing::instrument;

use crate::{
    db::{Question, TriviaStore},
    server::error::ApiError,
    telemetry::QUIZ_QUESTIONS_CNTR,
};

use super::ApiResponse;

/// Category id that stands for "every category".
const ALL_CATEGORIES: i64 = 0;

#[derive(Debug, Deserialize)]
struct QuizRequest {
    previous_questions: Option<Vec<i64>>,
    quiz_category: Option<QuizCategory>,
}

#[derive(Debug, Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
}

/// Picks one question uniformly from `pool`, skipping anything in `previous`.
/// `None` once every candidate has been asked.
pub fn pick_question<R: Rng + ?Sized>(
    pool: Vec<Question>,
    previous: &[i64],
    rng: &mut R,
) -> Option<Question> {
    let asked: HashSet<i64> = previous.iter().copied().collect();
    let candidates: Vec<Question> = pool
        .into_iter()
        .filter(|question| !asked.contains(&question.id))
        .collect();
    candidates.choose(rng).cloned()
}

#[instrument(skip_all)]
async fn next_quiz_question<S: TriviaStore>(
    State(store): State<S>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResponse<Json<QuizResponse>> {
    let Json(request) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "Unreadable quiz body");
        ApiError::BadRequest
    })?;
    let (Some(previous_questions), Some(quiz_category)) =
        (request.previous_questions, request.quiz_category)
    else {
        return Err(ApiError::BadRequest);
    };

    let pool = if quiz_category.id == ALL_CATEGORIES {
        store.questions().await?
    } else {
        store.questions_for_category(quiz_category.id).await?
    };

    let question = pick_question(pool, &previous_questions, &mut rand::thread_rng());
    match &question {
        Some(question) => {
            QUIZ_QUESTIONS_CNTR
                .with_label_values(&[quiz_category.id.to_string().as_str()])
                .inc();
            tracing::info!(
                category = quiz_category.id,
                id = question.id,
                asked = previous_questions.len(),
                "Quiz question served"
            );
        }
        None => tracing::info!(category = quiz_category.id, "Quiz exhausted"),
    }

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn quizzes_router<S: TriviaStore>() -> Router<S> {
    Router::new().route("/quizzes", post(next_quiz_question::<S>))
}
