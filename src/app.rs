use std::net::TcpListener;
use std::path::PathBuf;

use actix_files::{Files, NamedFile};
use actix_web::dev::{fn_service, Server, ServiceRequest, ServiceResponse};
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};

use serde::Serialize;

use sqlx::PgPool;

use tracing_actix_web::TracingLogger;

use crate::auth::AuthSecrets;
use crate::client::EmailClient;
use crate::controller::{admin, contact};

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
}

/// Simple health-check endpoint
///
/// Reports liveness only; neither the store nor the email service is touched.
#[tracing::instrument(name = "Health check")]
#[get("/api/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus { status: "running" })
}

/// Serve the bundled admin page
async fn admin_page(static_dir: web::Data<PathBuf>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open_async(static_dir.join("admin.html")).await?)
}

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    pool: PgPool,
    email_client: EmailClient,
    auth_secrets: AuthSecrets,
    static_dir: PathBuf,
) -> anyhow::Result<Server> {
    // Wrap application data
    let pool = web::Data::new(pool);
    let email_client = web::Data::new(email_client);
    let auth_secrets = web::Data::new(auth_secrets);
    let static_dir_data = web::Data::new(static_dir.clone());

    // Start the server
    let server = HttpServer::new(move || {
        let entry = static_dir.join("index.html");

        App::new()
            .wrap(TracingLogger::default())
            .app_data(pool.clone())
            .app_data(email_client.clone())
            .app_data(auth_secrets.clone())
            .app_data(static_dir_data.clone())
            // API routes are registered ahead of the file service so they
            // always take precedence over the fallback
            .service(health_check)
            .service(contact::scope())
            .service(admin::scope())
            .service(admin::submissions_scope())
            .route("/admin", web::get().to(admin_page))
            // Bundled front-end; unmatched routes fall back to the entry document
            .service(
                Files::new("/", &static_dir)
                    .index_file("index.html")
                    .default_handler(fn_service(move |req: ServiceRequest| {
                        let entry = entry.clone();
                        async move {
                            let (req, _) = req.into_parts();
                            let file = NamedFile::open_async(entry).await?;
                            let res = file.into_response(&req);
                            Ok(ServiceResponse::new(req, res))
                        }
                    })),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
