use reqwest::Method;

use sqlx::PgPool;

use crate::helpers::TestApp;

#[sqlx::test]
async fn unmatched_routes_fall_back_to_the_entry_document(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .request(Method::GET, "some/client/route")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());

    let body = res.text().await.expect("Failed to read response body");
    assert!(body.contains("Front-end entry document"));

    Ok(())
}

#[sqlx::test]
async fn admin_page_is_served(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .request(Method::GET, "admin")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());

    let body = res.text().await.expect("Failed to read response body");
    assert!(body.contains("Leadbox Admin"));

    Ok(())
}

#[sqlx::test]
async fn api_routes_take_precedence_over_the_fallback(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app.health_check().await.expect("Failed to execute request");

    assert!(res.status().is_success());

    let body = res.text().await.expect("Failed to read response body");
    assert!(!body.contains("<html"));
    assert!(body.contains("running"));

    Ok(())
}
