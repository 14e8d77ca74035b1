use actix_web::dev::HttpServiceFactory;
use actix_web::{delete, get, post, web, HttpResponse, Responder};

use serde::{Deserialize, Serialize};

use sqlx::PgPool;

use crate::auth::{Administrator, ApiCaller, AuthSecrets};
use crate::error::{RestError, RestResult};
use crate::repo::{Submission, SubmissionRepo};

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    password: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginGranted {
    success: bool,
    token: String,
}

/// Login endpoint for administrators
///
/// There is no session store; the granted token is the static admin secret
/// itself, echoed back for use as a bearer credential.
#[tracing::instrument(name = "Log in an administrator", skip(body, secrets))]
#[post("/login")]
async fn login(
    _caller: ApiCaller, // API-key guard
    body: web::Json<LoginBody>,
    secrets: web::Data<AuthSecrets>,
) -> RestResult<impl Responder> {
    use secrecy::ExposeSecret;

    let password = body
        .into_inner()
        .password
        .filter(|password| !password.is_empty())
        .ok_or_else(|| RestError::BadRequest("Missing required field: password".into()))?;

    let admin_token = secrets.admin_token().expose_secret();
    if password != *admin_token {
        return Err(RestError::Unauthorized("Invalid password".into()));
    }

    Ok(HttpResponse::Ok().json(LoginGranted {
        success: true,
        token: admin_token.clone(),
    }))
}

#[derive(Debug, Serialize)]
struct SubmissionList {
    success: bool,
    data: Vec<Submission>,
}

/// List endpoint for stored submissions, most recent first
#[tracing::instrument(name = "List all submissions", skip(pool))]
#[get("")]
async fn list(
    _admin: Administrator, // Administrator guard
    pool: web::Data<PgPool>,
) -> RestResult<impl Responder> {
    let submissions = SubmissionRepo::fetch_all(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(SubmissionList {
        success: true,
        data: submissions,
    }))
}

#[derive(Debug, Serialize)]
struct SubmissionDeleted {
    success: bool,
    message: &'static str,
}

/// Delete endpoint for a single submission
#[tracing::instrument(name = "Delete a submission", skip(pool))]
#[delete("/{id}")]
async fn remove(
    _admin: Administrator, // Administrator guard
    pool: web::Data<PgPool>,
    path: web::Path<(i64,)>,
) -> RestResult<impl Responder> {
    let (id,) = path.into_inner();

    let rows_affected = SubmissionRepo::delete_by_id(pool.get_ref(), id).await?;
    if rows_affected == 0 {
        return Err(RestError::NotFound(format!("No submission with id {}", id)));
    }

    Ok(HttpResponse::Ok().json(SubmissionDeleted {
        success: true,
        message: "Submission deleted",
    }))
}

/// Admin login API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/api/admin").service(login)
}

/// Submission management API endpoints
pub fn submissions_scope() -> impl HttpServiceFactory {
    web::scope("/api/submissions").service(list).service(remove)
}
