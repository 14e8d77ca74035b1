use actix_web::dev::HttpServiceFactory;
use actix_web::{post, web, HttpResponse, Responder};

use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};

use sqlx::PgPool;

use crate::auth::ApiCaller;
use crate::client::{Email, EmailClient};
use crate::error::{RestError, RestResult};
use crate::repo::{NewSubmission, SubmissionRepo};

/// Body deserialization wrapper for parsing new submissions
///
/// Every field is optional at the wire level so that presence can be checked
/// explicitly and reported as a bad request rather than a deserialization
/// failure.
#[derive(Debug, Deserialize)]
pub struct NewSubmissionBody {
    name: Option<String>,
    business: Option<String>,
    service: Option<String>,
    phone: Option<String>,
    message: Option<String>,
}

impl TryInto<NewSubmission> for NewSubmissionBody {
    type Error = String;

    fn try_into(self) -> Result<NewSubmission, Self::Error> {
        let name = required_field("name", self.name)?;
        let business = required_field("business", self.business)?;
        let service = required_field("service", self.service)?;
        let phone = required_field("phone", self.phone)?;
        let message = self.message.unwrap_or_default();

        Ok(NewSubmission {
            name,
            business,
            service,
            phone,
            message,
        })
    }
}

fn required_field(field: &str, value: Option<String>) -> Result<String, String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("Missing required field: {}", field)),
    }
}

#[derive(Debug, Serialize)]
struct SubmissionCreated {
    success: bool,
    message: &'static str,
    #[serde(rename = "submissionId")]
    submission_id: i64,
}

/// Create endpoint for new contact submissions
#[tracing::instrument(name = "Create a new contact submission", skip(pool, email_client))]
#[post("")]
async fn create(
    _caller: ApiCaller, // API-key guard
    pool: web::Data<PgPool>,
    email_client: web::Data<EmailClient>,
    body: web::Json<NewSubmissionBody>,
) -> RestResult<impl Responder> {
    let new_submission: NewSubmission = body
        .into_inner()
        .try_into()
        .map_err(RestError::BadRequest)?;

    let id = SubmissionRepo::insert(pool.get_ref(), &new_submission).await?;

    // Detach the notification send; the response reflects only the store
    // outcome and must never wait on the email service
    let email = notification_email(id, &new_submission, Utc::now());
    let email_client = email_client.clone();
    tokio::spawn(async move {
        if let Err(error) = email_client.send(&email).await {
            tracing::error!(
                error.cause_chain = ?error,
                "Failed to send notification email for submission {}", id);
        }
    });

    Ok(HttpResponse::Ok().json(SubmissionCreated {
        success: true,
        message: "Submission received",
        submission_id: id,
    }))
}

/// Build the notification email for a newly stored submission
fn notification_email(id: i64, submission: &NewSubmission, received_at: DateTime<Utc>) -> Email {
    let subject = format!("New contact submission #{}", id);
    let html_body = format!(
        "<h1>New contact submission</h1>\
         <ul>\
         <li>Id: {}</li>\
         <li>Name: {}</li>\
         <li>Business: {}</li>\
         <li>Service: {}</li>\
         <li>Phone: {}</li>\
         <li>Message: {}</li>\
         <li>Received: {}</li>\
         </ul>",
        id,
        submission.name,
        submission.business,
        submission.service,
        submission.phone,
        submission.message,
        received_at,
    );
    let text_body = format!(
        "New contact submission #{}\n\n\
         Name: {}\n\
         Business: {}\n\
         Service: {}\n\
         Phone: {}\n\
         Message: {}\n\
         Received: {}\n",
        id,
        submission.name,
        submission.business,
        submission.service,
        submission.phone,
        submission.message,
        received_at,
    );

    Email {
        subject,
        html_body,
        text_body,
    }
}

/// Public contact API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/api/contact").service(create)
}
