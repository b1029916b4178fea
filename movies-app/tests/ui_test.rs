mod common;

use movies_app::AuditAction;
use tracing::Level;

async fn create_actor(ctx: &common::TestContext) -> i64 {
    ctx.app
        .post("/Actors/Create")
        .form(&[
            ("firstName", "Tom"),
            ("lastName", "Hanks"),
            ("birthDate", "1956-07-09"),
        ])
        .send()
        .await
        .assert_redirect("/Actors");
    let (id,): (i64,) = sqlx::query_as("SELECT MAX(id) FROM actors")
        .fetch_one(&ctx.pool)
        .await
        .unwrap();
    id
}

#[tokio::test]
async fn home_links_both_catalogs() {
    let ctx = common::setup().await;
    ctx.app
        .get("/")
        .send()
        .await
        .assert_ok()
        .assert_contains("href=\"/Actors\"")
        .assert_contains("href=\"/Movies\"");
}

#[tokio::test]
async fn create_redirects_and_audits_at_info() {
    let ctx = common::setup().await;
    let id = create_actor(&ctx).await;

    let records = ctx.audit.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.action, AuditAction::Created);
    assert_eq!(record.action.level(), Level::INFO);
    assert_eq!(record.id, id);
    assert_eq!(record.summary(), "Actor has been added!");
    assert_eq!(record.field("firstName"), Some("Tom"));
    assert_eq!(record.field("birthDate"), Some("1956-07-09"));

    ctx.app
        .get("/Actors")
        .send()
        .await
        .assert_ok()
        .assert_contains("<td>Hanks</td>");
}

#[tokio::test]
async fn invalid_form_rerenders_with_errors_and_persists_nothing() {
    let ctx = common::setup().await;
    ctx.app
        .post("/Actors/Create")
        .form(&[
            ("firstName", ""),
            ("lastName", "Hanks"),
            ("birthDate", "1956-07-09"),
        ])
        .send()
        .await
        .assert_ok()
        .assert_contains("<form method=\"post\" action=\"/Actors/Create\">")
        .assert_contains("class=\"field-error\"")
        .assert_contains("value=\"Hanks\"");

    assert_eq!(common::count_rows(&ctx.pool, "actors").await, 0);
    assert!(ctx.audit.records().is_empty());
}

#[tokio::test]
async fn edit_form_is_prefilled_and_not_audited() {
    let ctx = common::setup().await;
    let id = create_actor(&ctx).await;

    ctx.app
        .get(&format!("/Actors/Edit/{id}"))
        .send()
        .await
        .assert_ok()
        .assert_contains("value=\"Tom\"")
        .assert_contains("value=\"1956-07-09\"");

    assert_eq!(ctx.audit.actions(), [AuditAction::Created]);
}

#[tokio::test]
async fn edit_submit_updates_and_audits() {
    let ctx = common::setup().await;
    let id = create_actor(&ctx).await;

    ctx.app
        .post(&format!("/Actors/Edit/{id}"))
        .form(&[
            ("firstName", "Thomas"),
            ("lastName", "Hanks"),
            ("birthDate", "1956-07-09"),
        ])
        .send()
        .await
        .assert_redirect("/Actors");

    let records = ctx.audit.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].action, AuditAction::Updated);
    assert_eq!(records[1].summary(), "Actor has been updated!");
    assert_eq!(records[1].field("firstName"), Some("Thomas"));

    ctx.app
        .get(&format!("/Actors/Details/{id}"))
        .send()
        .await
        .assert_ok()
        .assert_contains("<dd>Thomas</dd>");
}

#[tokio::test]
async fn edit_of_missing_record_renders_not_found() {
    let ctx = common::setup().await;
    ctx.app.get("/Actors/Edit/9999").send().await.assert_not_found();
    ctx.app
        .post("/Actors/Edit/9999")
        .form(&[
            ("firstName", "Tom"),
            ("lastName", "Hanks"),
            ("birthDate", "1956-07-09"),
        ])
        .send()
        .await
        .assert_not_found()
        .assert_contains("Actor 9999 does not exist");
    assert!(ctx.audit.records().is_empty());
}

#[tokio::test]
async fn delete_confirms_then_audits_at_warn() {
    let ctx = common::setup().await;
    let id = create_actor(&ctx).await;

    ctx.app
        .get(&format!("/Actors/Delete/{id}"))
        .send()
        .await
        .assert_ok()
        .assert_contains("Are you sure you want to delete this?");
    assert_eq!(ctx.audit.actions(), [AuditAction::Created]);

    ctx.app
        .post(&format!("/Actors/Delete/{id}"))
        .send()
        .await
        .assert_redirect("/Actors");

    let records = ctx.audit.records();
    let deleted = records.last().unwrap();
    assert_eq!(deleted.action, AuditAction::Deleted);
    assert_eq!(deleted.action.level(), Level::WARN);
    assert_eq!(deleted.summary(), "Actor has been deleted!");
    assert_eq!(deleted.field("lastName"), Some("Hanks"));

    ctx.app
        .get(&format!("/Actors/Details/{id}"))
        .send()
        .await
        .assert_not_found();
    ctx.app
        .post(&format!("/Actors/Delete/{id}"))
        .send()
        .await
        .assert_not_found();
    assert_eq!(ctx.audit.records().len(), 2);
}

#[tokio::test]
async fn movie_pages_follow_the_same_flow() {
    let ctx = common::setup().await;
    ctx.app
        .get("/Movies/Create")
        .send()
        .await
        .assert_ok()
        .assert_contains("name=\"releaseDate\"")
        .assert_contains("step=\"0.01\"");

    ctx.app
        .post("/Movies/Create")
        .form(&[
            ("title", "Ronin"),
            ("releaseDate", "1998-09-25"),
            ("genre", "Action"),
            ("price", "7.5"),
        ])
        .send()
        .await
        .assert_redirect("/Movies");

    let records = ctx.audit.records();
    assert_eq!(records[0].summary(), "Movie has been added!");
    assert_eq!(records[0].field("price"), Some("7.5"));

    ctx.app
        .get("/Movies")
        .send()
        .await
        .assert_ok()
        .assert_contains("<td>Ronin</td>");
}

#[tokio::test]
async fn rendered_values_are_escaped() {
    let ctx = common::setup().await;
    ctx.app
        .post("/Movies/Create")
        .form(&[
            ("title", "<script>alert(1)</script>"),
            ("releaseDate", "2001-01-01"),
            ("genre", "Drama"),
            ("price", "1"),
        ])
        .send()
        .await
        .assert_redirect("/Movies");

    let page = ctx.app.get("/Movies").send().await.assert_ok().text();
    assert!(!page.contains("<script>"));
    assert!(page.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn non_numeric_price_rerenders_instead_of_failing() {
    let ctx = common::setup().await;
    ctx.app
        .post("/Movies/Create")
        .form(&[
            ("title", "Ronin"),
            ("releaseDate", "1998-09-25"),
            ("genre", "Action"),
            ("price", "NaN"),
        ])
        .send()
        .await
        .assert_ok()
        .assert_contains("<form method=\"post\" action=\"/Movies/Create\">")
        .assert_contains("<span class=\"field-error\">must be a number</span>")
        .assert_contains("value=\"NaN\"");

    assert_eq!(common::count_rows(&ctx.pool, "movies").await, 0);
    assert!(ctx.audit.records().is_empty());
}

#[tokio::test]
async fn cleared_date_rerenders_with_field_error() {
    let ctx = common::setup().await;
    ctx.app
        .post("/Actors/Create")
        .form(&[("firstName", "Tom"), ("lastName", "Hanks"), ("birthDate", "")])
        .send()
        .await
        .assert_ok()
        .assert_contains("<span class=\"field-error\">must be a date (YYYY-MM-DD)</span>")
        .assert_contains("value=\"Tom\"");

    assert_eq!(common::count_rows(&ctx.pool, "actors").await, 0);
}

#[tokio::test]
async fn edit_with_cleared_date_keeps_the_record() {
    let ctx = common::setup().await;
    let id = create_actor(&ctx).await;

    ctx.app
        .post(&format!("/Actors/Edit/{id}"))
        .form(&[("firstName", "Thomas"), ("lastName", "Hanks"), ("birthDate", "")])
        .send()
        .await
        .assert_ok()
        .assert_contains(&format!("action=\"/Actors/Edit/{id}\""))
        .assert_contains("must be a date (YYYY-MM-DD)");

    ctx.app
        .get(&format!("/Actors/Details/{id}"))
        .send()
        .await
        .assert_contains("<dd>Tom</dd>");
    assert_eq!(ctx.audit.actions(), [AuditAction::Created]);
}
