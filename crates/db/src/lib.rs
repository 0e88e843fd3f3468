#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod error;
pub mod filter;
pub mod memory;

use alloc::{format, vec::Vec};
use core::future::{self, Future};
use futures_util::TryStreamExt;
use tokio_postgres::error::SqlState;

pub use filter::Filter;
pub use memory::Memory;
pub use model::{self, Category, NewQuestion, Question};
pub use tokio_postgres::{tls::NoTls, Client, Config};

/// Persistent collection of questions and categories.
pub trait Store: Send + Sync {
    /// All categories, ordered by ID.
    fn categories(&self) -> impl Future<Output = error::Result<Vec<Category>>> + Send;

    fn category(&self, id: i32) -> impl Future<Output = error::Result<Option<Category>>> + Send;

    /// All questions matching the filter, ordered by ID.
    fn questions(&self, filter: &Filter) -> impl Future<Output = error::Result<Vec<Question>>> + Send;

    /// Stores a new question and returns its freshly assigned ID.
    fn insert_question(&self, question: &NewQuestion) -> impl Future<Output = error::Result<i32>> + Send;

    /// Permanently removes a question. Fails with [`NotFound`](error::Error::NotFound) if it does not exist.
    fn delete_question(&self, id: i32) -> impl Future<Output = error::Result<()>> + Send;
}

pub struct Database(Client);

impl From<Client> for Database {
    fn from(client: Client) -> Self {
        Self(client)
    }
}

fn deserialize_category_from_row(row: tokio_postgres::Row) -> Result<Category, tokio_postgres::Error> {
    let id = row.try_get("id")?;
    let kind = row.try_get("type")?;
    Ok(Category { id, kind })
}

fn deserialize_question_from_row(row: tokio_postgres::Row) -> Result<Question, tokio_postgres::Error> {
    let id = row.try_get("id")?;
    let question = row.try_get("question")?;
    let answer = row.try_get("answer")?;
    let category = row.try_get("category")?;
    let difficulty = row.try_get("difficulty")?;
    Ok(Question { id, question, answer, category, difficulty })
}

impl Store for Database {
    async fn categories(&self) -> error::Result<Vec<Category>> {
        let rows = self.0.query("SELECT id, type FROM categories ORDER BY id", &[]).await?;
        let categories = rows.into_iter().map(deserialize_category_from_row).collect::<Result<_, _>>()?;
        Ok(categories)
    }

    async fn category(&self, id: i32) -> error::Result<Option<Category>> {
        let Some(row) = self.0.query_opt("SELECT id, type FROM categories WHERE id = $1", &[&id]).await? else {
            return Ok(None);
        };
        Ok(Some(deserialize_category_from_row(row)?))
    }

    async fn questions(&self, filter: &Filter) -> error::Result<Vec<Question>> {
        let (clause, params) = filter.to_sql();
        let query =
            format!("SELECT id, question, answer, category, difficulty FROM questions WHERE {clause} ORDER BY id");
        let questions = self
            .0
            .query_raw(query.as_str(), params)
            .await?
            .and_then(|row| future::ready(deserialize_question_from_row(row)))
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn insert_question(&self, question: &NewQuestion) -> error::Result<i32> {
        let (text, answer) = question.texts().ok_or(error::Error::BadInput)?;
        let err = match self
            .0
            .query_one(
                "INSERT INTO questions (question, answer, category, difficulty) VALUES ($1, $2, $3, $4) RETURNING id",
                &[&text, &answer, &question.category, &question.difficulty],
            )
            .await
        {
            Ok(row) => return Ok(row.try_get("id")?),
            Err(err) => err,
        };

        let Some(db) = err.as_db_error() else {
            return Err(err.into());
        };

        if *db.code() == SqlState::CHECK_VIOLATION
            && matches!(db.constraint(), Some("question_check" | "answer_check"))
        {
            return Err(error::Error::BadInput);
        }

        Err(err.into())
    }

    async fn delete_question(&self, id: i32) -> error::Result<()> {
        match self.0.execute("DELETE FROM questions WHERE id = $1", &[&id]).await? {
            1 => Ok(()),
            0 => Err(error::Error::NotFound),
            _ => Err(error::Error::Fatal),
        }
    }
}
