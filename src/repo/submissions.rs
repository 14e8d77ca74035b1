use chrono::{DateTime, Utc};

use serde::Serialize;

use sqlx::PgExecutor;

/// A new contact submission that has passed required-field validation
#[derive(Debug)]
pub struct NewSubmission {
    pub name: String,
    pub business: String,
    pub service: String,
    pub phone: String,
    pub message: String,
}

/// Stored contact submission record
#[derive(Debug, Serialize)]
pub struct Submission {
    pub id: i64,
    pub name: String,
    pub business: String,
    pub service: String,
    pub phone: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub status: String,
}

/// Repository for interfacing with the submissions table
pub struct SubmissionRepo;

impl SubmissionRepo {
    #[tracing::instrument(name = "Insert submission", skip(executor))]
    pub async fn insert<'con>(
        executor: impl PgExecutor<'con>,
        new_submission: &NewSubmission,
    ) -> sqlx::Result<i64> {
        let row = sqlx::query!(
            "insert into submissions(name, business, service, phone, message) \
             values ($1, $2, $3, $4, $5) returning id",
            new_submission.name,
            new_submission.business,
            new_submission.service,
            new_submission.phone,
            new_submission.message,
        )
        .fetch_one(executor)
        .await?;

        Ok(row.id)
    }

    #[tracing::instrument(name = "Fetch all submissions", skip(executor))]
    pub async fn fetch_all<'con>(executor: impl PgExecutor<'con>) -> sqlx::Result<Vec<Submission>> {
        let submissions = sqlx::query_as!(
            Submission,
            "select id, name, business, service, phone, message, timestamp, status \
             from submissions order by timestamp desc"
        )
        .fetch_all(executor)
        .await?;

        Ok(submissions)
    }

    /// Delete a submission, reporting how many rows were removed
    ///
    /// Zero rows is not an error at this layer; the caller decides what a
    /// missing target means.
    #[tracing::instrument(name = "Delete a submission by id", skip(executor))]
    pub async fn delete_by_id<'con>(executor: impl PgExecutor<'con>, id: i64) -> sqlx::Result<u64> {
        let result = sqlx::query!("delete from submissions where id=$1", id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
