//! SQLite implementation of person repository.

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::sync::Arc;

use crate::domain::entities::{NewPerson, Person};
use crate::domain::repositories::PersonRepository;
use crate::error::AppError;

/// SQLite repository for person storage and retrieval.
///
/// Writes run in a transaction that is committed only once the statement has
/// succeeded and affected a row.
pub struct SqlitePersonRepository {
    pool: Arc<SqlitePool>,
}

impl SqlitePersonRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

/// Rolls back `tx` and hands `err` back to the caller.
async fn abort<T>(tx: Transaction<'_, Sqlite>, err: AppError) -> Result<T, AppError> {
    if let Err(rollback_err) = tx.rollback().await {
        tracing::warn!(error = %rollback_err, "Transaction rollback failed");
    }
    Err(err)
}

fn not_found(id: i64) -> AppError {
    AppError::not_found(format!("Person {id} not found"))
}

#[async_trait]
impl PersonRepository for SqlitePersonRepository {
    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM people")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Person>, AppError> {
        let people = sqlx::query_as::<_, Person>(
            r#"
            SELECT id, first_name, last_name, email
            FROM people
            ORDER BY id ASC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(people)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Person>, AppError> {
        let person = sqlx::query_as::<_, Person>(
            "SELECT id, first_name, last_name, email FROM people WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(person)
    }

    async fn create(&self, new_person: NewPerson) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        let result =
            sqlx::query("INSERT INTO people (first_name, last_name, email) VALUES (?1, ?2, ?3)")
                .bind(&new_person.first_name)
                .bind(&new_person.last_name)
                .bind(&new_person.email)
                .execute(&mut *tx)
                .await;

        let id = match result {
            Ok(done) => done.last_insert_rowid(),
            Err(e) => return abort(tx, e.into()).await,
        };

        tx.commit().await?;
        Ok(id)
    }

    async fn update(&self, id: i64, person: NewPerson) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE people SET first_name = ?1, last_name = ?2, email = ?3 WHERE id = ?4",
        )
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(&person.email)
        .bind(id)
        .execute(&mut *tx)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => return abort(tx, not_found(id)).await,
            Ok(_) => {}
            Err(e) => return abort(tx, e.into()).await,
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM people WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => return abort(tx, not_found(id)).await,
            Ok(_) => {}
            Err(e) => return abort(tx, e.into()).await,
        }

        tx.commit().await?;
        Ok(())
    }
}
