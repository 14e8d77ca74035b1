use std::net::TcpListener;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::{Client, Method, Response};

use secrecy::Secret;

use serde::Serialize;

use sqlx::PgPool;

use url::Url;

use wiremock::MockServer;

use leadbox::app;
use leadbox::auth::AuthSecrets;
use leadbox::client::EmailClient;

#[derive(Debug, Serialize)]
pub struct NewSubmission {
    pub name: Option<String>,
    pub business: Option<String>,
    pub service: Option<String>,
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NewSubmission {
    pub fn filled() -> Self {
        Self {
            name: Some("Test Name".into()),
            business: Some("Test Business".into()),
            service: Some("Test Service".into()),
            phone: Some("555-0100".into()),
            message: Some("Test message".into()),
        }
    }
}

pub struct TestApp {
    addr: String,

    pub api_key: String,
    pub admin_secret: String,

    pub client: Client,
    pub email_server: MockServer,
}

impl TestApp {
    pub async fn spawn(pool: &PgPool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let api_key = random_secret();
        let admin_secret = random_secret();

        let auth_secrets = AuthSecrets::new(
            Secret::new(api_key.clone()),
            Secret::new(admin_secret.clone()),
        );

        let email_server = MockServer::start().await;

        let email_client = {
            let sender = "noreply@test.com"
                .parse()
                .expect("Failed to parse sender email address");
            let recipient = "owner@test.com"
                .parse()
                .expect("Failed to parse recipient email address");
            let api_base_url =
                Url::parse(&email_server.uri()).expect("Failed to parse mock server uri");
            let api_auth_token = Secret::new("TestAuthorization".into());
            let api_timeout = Duration::from_secs(2);

            EmailClient::new(sender, recipient, api_timeout, api_base_url, api_auth_token)
                .expect("Failed to create email client")
        };

        let static_dir = PathBuf::from("static");

        let server = app::run(
            listener,
            pool.clone(),
            email_client,
            auth_secrets,
            static_dir,
        )
        .expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::new();

        Self {
            addr,
            api_key,
            admin_secret,
            client,
            email_server,
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "api/health").send().await
    }

    pub async fn contact_create(
        &self,
        api_key: Option<&str>,
        new_submission: &NewSubmission,
    ) -> reqwest::Result<Response> {
        let mut req = self.request(Method::POST, "api/contact").json(new_submission);
        if let Some(key) = api_key {
            req = req.header("x-api-key", key);
        }
        req.send().await
    }

    /// Contact submission with the API key carried in the query string
    pub async fn contact_create_with_query_key(
        &self,
        api_key: &str,
        new_submission: &NewSubmission,
    ) -> reqwest::Result<Response> {
        self.request(Method::POST, &format!("api/contact?apiKey={}", api_key))
            .json(new_submission)
            .send()
            .await
    }

    pub async fn admin_login(
        &self,
        api_key: Option<&str>,
        password: Option<&str>,
    ) -> reqwest::Result<Response> {
        let mut req = self
            .request(Method::POST, "api/admin/login")
            .json(&serde_json::json!({ "password": password }));
        if let Some(key) = api_key {
            req = req.header("x-api-key", key);
        }
        req.send().await
    }

    pub async fn submissions_list(&self, token: Option<&str>) -> reqwest::Result<Response> {
        let mut req = self.request(Method::GET, "api/submissions");
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        req.send().await
    }

    pub async fn submission_delete(
        &self,
        token: Option<&str>,
        id: i64,
    ) -> reqwest::Result<Response> {
        let mut req = self.request(Method::DELETE, &format!("api/submissions/{}", id));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        req.send().await
    }

    /// Wait for the detached notification task to reach the mock email server
    pub async fn wait_for_email_requests(&self, count: usize) -> Vec<wiremock::Request> {
        for _ in 0..50 {
            let requests = self
                .email_server
                .received_requests()
                .await
                .expect("Request recording is disabled");
            if requests.len() >= count {
                return requests;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("Timed out waiting for {} email request(s)", count);
    }
}

fn random_secret() -> String {
    use rand::{distributions::Alphanumeric, Rng};

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}
