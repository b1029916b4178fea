mod common;

use serde_json::json;

fn heat() -> serde_json::Value {
    json!({"title": "Heat", "releaseDate": "1995-12-15", "genre": "Crime", "price": 9.99})
}

#[tokio::test]
async fn empty_catalog() {
    let ctx = common::setup().await;
    ctx.app
        .get("/api/movies")
        .send()
        .await
        .assert_ok()
        .assert_json_path("len()", 0);
}

#[tokio::test]
async fn create_get_update_delete() {
    let ctx = common::setup().await;

    let location = ctx
        .app
        .post("/api/movies")
        .json(&heat())
        .send()
        .await
        .assert_created()
        .assert_json_path("title", "Heat")
        .assert_json_path("price", 9.99)
        .header("location")
        .unwrap()
        .to_string();
    assert!(location.starts_with("/api/movies/"));

    ctx.app
        .get(&location)
        .send()
        .await
        .assert_ok()
        .assert_json_path("title", "Heat")
        .assert_json_path("releaseDate", "1995-12-15")
        .assert_json_path("genre", "Crime")
        .assert_json_path("price", 9.99);

    ctx.app
        .put(&location)
        .json(&json!({"title": "Heat (Director's Cut)", "releaseDate": "2022-05-01", "genre": "Crime", "price": 14.5}))
        .send()
        .await
        .assert_ok()
        .assert_json_path("title", "Heat (Director's Cut)");

    ctx.app
        .get("/api/movies")
        .send()
        .await
        .assert_json_path("len()", 1)
        .assert_json_path("[0].releaseDate", "2022-05-01")
        .assert_json_path("[0].price", 14.5);

    ctx.app
        .delete(&location)
        .send()
        .await
        .assert_ok()
        .assert_json_path("title", "Heat (Director's Cut)");
    ctx.app.get(&location).send().await.assert_not_found();
}

#[tokio::test]
async fn negative_price_is_rejected() {
    let ctx = common::setup().await;
    let mut body = heat();
    body["price"] = json!(-3.0);

    ctx.app
        .post("/api/movies")
        .json(&body)
        .send()
        .await
        .assert_bad_request()
        .assert_json_path("details[0].field", "price");
    assert_eq!(common::count_rows(&ctx.pool, "movies").await, 0);
}

#[tokio::test]
async fn absent_ids() {
    let ctx = common::setup().await;
    ctx.app.get("/api/movies/9999").send().await.assert_not_found();
    ctx.app
        .put("/api/movies/9999")
        .json(&heat())
        .send()
        .await
        .assert_bad_request();
    ctx.app.delete("/api/movies/9999").send().await.assert_not_found();
}

#[tokio::test]
async fn actors_and_movies_are_separate_collections() {
    let ctx = common::setup().await;
    ctx.app.post("/api/movies").json(&heat()).send().await.assert_created();

    ctx.app
        .get("/api/actors")
        .send()
        .await
        .assert_json_path("len()", 0);
}
