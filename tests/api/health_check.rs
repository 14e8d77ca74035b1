use sqlx::PgPool;

use crate::helpers::TestApp;

#[sqlx::test]
async fn is_present(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app.health_check().await.expect("Failed to execute request");

    assert!(res.status().is_success());

    let body: serde_json::Value = res.json().await.expect("Failed to parse response body");
    assert_eq!("running", body["status"]);

    Ok(())
}

#[sqlx::test]
async fn does_not_depend_on_the_email_service(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let health_url = format!("{}/api/health", app.addr());
    let client = app.client.clone();

    // Shut the mock email server down before probing
    drop(app);

    let res = client
        .get(health_url)
        .send()
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());

    Ok(())
}
