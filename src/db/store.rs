//! Storage seam the HTTP handlers are written against.

use std::future::Future;

use sqlx::SqlitePool;

use super::queries::{categories, questions};
use super::{Category, NewQuestion, Question};

pub trait TriviaStore: Clone + Send + Sync + 'static {
    /// All categories ordered by id.
    fn categories(&self) -> impl Future<Output = sqlx::Result<Vec<Category>>> + Send;

    fn category(&self, id: i64) -> impl Future<Output = sqlx::Result<Option<Category>>> + Send;

    /// All questions ordered by id.
    fn questions(&self) -> impl Future<Output = sqlx::Result<Vec<Question>>> + Send;

    fn question(&self, id: i64) -> impl Future<Output = sqlx::Result<Option<Question>>> + Send;

    fn questions_for_category(
        &self,
        category: i64,
    ) -> impl Future<Output = sqlx::Result<Vec<Question>>> + Send;

    fn search_questions(
        &self,
        term: &str,
    ) -> impl Future<Output = sqlx::Result<Vec<Question>>> + Send;

    /// Persists the question and returns its assigned id.
    fn create_question(
        &self,
        question: &NewQuestion,
    ) -> impl Future<Output = sqlx::Result<i64>> + Send;

    fn delete_question(&self, id: i64) -> impl Future<Output = sqlx::Result<bool>> + Send;
}

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl TriviaStore for SqliteStore {
    async fn categories(&self) -> sqlx::Result<Vec<Category>> {
        categories::get_all_categories(&self.pool).await
    }

    async fn category(&self, id: i64) -> sqlx::Result<Option<Category>> {
        categories::get_category(&self.pool, id).await
    }

    async fn questions(&self) -> sqlx::Result<Vec<Question>> {
        questions::get_all_questions(&self.pool).await
    }

    async fn question(&self, id: i64) -> sqlx::Result<Option<Question>> {
        questions::get_question_by_id(&self.pool, id).await
    }

    async fn questions_for_category(&self, category: i64) -> sqlx::Result<Vec<Question>> {
        questions::get_questions_for_category(&self.pool, category).await
    }

    async fn search_questions(&self, term: &str) -> sqlx::Result<Vec<Question>> {
        questions::search_questions(&self.pool, term).await
    }

    async fn create_question(&self, question: &NewQuestion) -> sqlx::Result<i64> {
        questions::create_question(&self.pool, question).await
    }

    async fn delete_question(&self, id: i64) -> sqlx::Result<bool> {
        questions::delete_question(&self.pool, id).await
    }
}
