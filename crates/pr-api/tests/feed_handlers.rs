use actix_web::http::header::HeaderValue;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use pr_api::{configure_routes, AppState, DISPLAY_NAME_HEADER};
use pr_auth_simple::SimpleIdentityProvider;
use pr_core::SocialHub;
use secrecy::SecretString;
use serde_json::{json, Value};

const BOUNDARY: &str = "pr-test-boundary";

fn state(max_image_bytes: usize) -> web::Data<AppState> {
    let identity = SimpleIdentityProvider::new(SecretString::from("test-salt"), 40);
    web::Data::new(AppState::new(SocialHub::new(), Box::new(identity), max_image_bytes))
}

/// (field name, content type for file parts, value)
fn multipart(fields: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, content_type, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match content_type {
            Some(ct) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"upload.jpg\"\r\nContent-Type: {ct}\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(value);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(user: &str, fields: &[(&str, Option<&str>, &[u8])]) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/photos")
        .insert_header(("content-type", format!("multipart/form-data; boundary={BOUNDARY}")))
        .insert_header((DISPLAY_NAME_HEADER, user.to_string()))
        .set_payload(multipart(fields))
}

#[actix_web::test]
async fn test_group_lifecycle() {
    let app = test::init_service(App::new().app_data(state(1024)).configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/groups")
        .insert_header((DISPLAY_NAME_HEADER, "u1"))
        .set_json(json!({ "name": "Alpha" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/groups")
        .insert_header((DISPLAY_NAME_HEADER, "u2"))
        .set_json(json!({ "name": "Alpha" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/groups")
        .insert_header((DISPLAY_NAME_HEADER, "u2"))
        .set_json(json!({ "name": "   " }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/groups/Alpha/join")
            .insert_header((DISPLAY_NAME_HEADER, "u2"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["member_count"], 2);
    }

    let req = test::TestRequest::post()
        .uri("/api/groups/Nope/join")
        .insert_header((DISPLAY_NAME_HEADER, "u2"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/groups/mine")
        .insert_header((DISPLAY_NAME_HEADER, "u2"))
        .to_request();
    let mine: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(mine, vec!["Alpha".to_string()]);
}

#[actix_web::test]
async fn test_article_likes_once_per_identity() {
    let app = test::init_service(App::new().app_data(state(1024)).configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/articles")
        .insert_header((DISPLAY_NAME_HEADER, "ana"))
        .set_json(json!({ "title": "Meal prep", "body": "Rice and beans", "tags": ["diet"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("article-"));

    let like = |user: &'static str| {
        test::TestRequest::post()
            .uri(&format!("/api/feed/{id}/like"))
            .insert_header((DISPLAY_NAME_HEADER, user))
            .to_request()
    };

    let first: Value = test::call_and_read_body_json(&app, like("bruno")).await;
    assert_eq!(first, json!({ "liked": true, "likes": 1 }));

    let again: Value = test::call_and_read_body_json(&app, like("bruno")).await;
    assert_eq!(again, json!({ "liked": false, "likes": 1 }));

    let req = test::TestRequest::post()
        .uri("/api/feed/article-0190a0b4c4c87000800000000000000a/like")
        .insert_header((DISPLAY_NAME_HEADER, "bruno"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_blank_article_is_rejected() {
    let app = test::init_service(App::new().app_data(state(1024)).configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/articles")
        .set_json(json!({ "title": "", "body": "text" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );

    let req = test::TestRequest::get().uri("/api/feed").to_request();
    let feed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(feed.is_empty());
}

#[actix_web::test]
async fn test_photo_upload_likes_and_leaderboard() {
    let app = test::init_service(App::new().app_data(state(1024)).configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/groups")
        .insert_header((DISPLAY_NAME_HEADER, "ana"))
        .set_json(json!({ "name": "Alpha" }))
        .to_request();
    test::call_service(&app, req).await;

    let image: &[u8] = b"\xff\xd8\xff\xe0fake-jpeg";
    let req = upload_request(
        "ana",
        &[
            ("caption", None, &b"new deadlift pr"[..]),
            ("group", None, &b"Alpha"[..]),
            ("image", Some("image/jpeg"), image),
        ],
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let photo_id = created["id"].as_str().unwrap().to_string();
    let feed_id = created["feed_item_id"].as_str().unwrap().to_string();
    assert_eq!(created["group"], "Alpha");

    // One like through each entry point; they share one like-set.
    let req = test::TestRequest::post()
        .uri(&format!("/api/photos/{photo_id}/like"))
        .insert_header((DISPLAY_NAME_HEADER, "bruno"))
        .to_request();
    let liked: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(liked, json!({ "liked": true, "likes": 1 }));

    let req = test::TestRequest::post()
        .uri(&format!("/api/feed/{feed_id}/like"))
        .insert_header((DISPLAY_NAME_HEADER, "bruno"))
        .to_request();
    let liked: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(liked, json!({ "liked": false, "likes": 1 }));

    let req = test::TestRequest::post()
        .uri(&format!("/api/feed/{feed_id}/like"))
        .insert_header((DISPLAY_NAME_HEADER, "carla"))
        .to_request();
    let liked: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(liked, json!({ "liked": true, "likes": 2 }));

    let req = test::TestRequest::get().uri("/api/feed?group=Alpha").to_request();
    let feed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["id"], feed_id.as_str());
    assert_eq!(feed[0]["kind"], "photo");
    assert_eq!(feed[0]["likes"], 2);
    assert_eq!(feed[0]["liked_by"], json!(["bruno", "carla"]));

    let req = test::TestRequest::get().uri("/api/leaderboard").to_request();
    let board: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        board,
        json!([{ "group_name": "Alpha", "total_likes": 2, "member_count": 1, "photo_count": 1 }])
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/photos/{photo_id}/image"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap().to_str().unwrap(),
        "image/jpeg"
    );
    let bytes = test::read_body(resp).await;
    assert_eq!(bytes.as_ref(), image);
}

#[actix_web::test]
async fn test_upload_requires_image_within_limit() {
    let app = test::init_service(App::new().app_data(state(16)).configure(configure_routes)).await;

    let req = upload_request("ana", &[("caption", None, &b"no picture"[..])]).to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );

    let big = vec![0u8; 64];
    let req = upload_request("ana", &[("image", Some("image/png"), big.as_slice())]).to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );

    let req = test::TestRequest::get().uri("/api/feed").to_request();
    let feed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(feed.is_empty());
}

#[actix_web::test]
async fn test_feed_query_parameters() {
    let app = test::init_service(App::new().app_data(state(1024)).configure(configure_routes)).await;

    for title in ["first", "second"] {
        let req = test::TestRequest::post()
            .uri("/api/articles")
            .insert_header((DISPLAY_NAME_HEADER, "ana"))
            .set_json(json!({ "title": title, "body": "text" }))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get()
        .uri("/api/feed?kind=article&sort=recent&group=")
        .to_request();
    let feed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    let titles: Vec<&str> = feed.iter().filter_map(|i| i["title"].as_str()).collect();
    assert_eq!(titles, vec!["second", "first"]);

    let req = test::TestRequest::get().uri("/api/feed?kind=photo").to_request();
    let feed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(feed.is_empty());

    let req = test::TestRequest::get().uri("/api/feed?sort=oldest").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[actix_web::test]
async fn test_html_pages_render() {
    let app = test::init_service(App::new().app_data(state(1024)).configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/articles")
        .insert_header((DISPLAY_NAME_HEADER, "ana"))
        .set_json(json!({ "title": "Leg day recap", "body": "# Squats\n- 5x5" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((DISPLAY_NAME_HEADER, "bruno"))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Leg day recap"));
    assert!(html.contains("<strong>Squats</strong>"));
    assert!(html.contains("bruno"));

    let req = test::TestRequest::get().uri("/leaderboard").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_anonymous_callers_get_a_guest_handle() {
    let app = test::init_service(App::new().app_data(state(1024)).configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/articles")
        .set_json(json!({ "title": "hello", "body": "world" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/feed").to_request();
    let feed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(feed[0]["author"].as_str().unwrap().starts_with("guest-"));
}

#[actix_web::test]
async fn test_non_ascii_display_name_is_kept() {
    let app = test::init_service(App::new().app_data(state(1024)).configure(configure_routes)).await;
    let name = HeaderValue::from_bytes("João".as_bytes()).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/groups")
        .insert_header((DISPLAY_NAME_HEADER, name.clone()))
        .set_json(json!({ "name": "Corrida" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/articles")
        .insert_header((DISPLAY_NAME_HEADER, name.clone()))
        .set_json(json!({ "title": "Treino", "body": "5 km" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/feed").to_request();
    let feed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(feed[0]["author"], "João");

    let req = test::TestRequest::get()
        .uri("/api/groups/mine")
        .insert_header((DISPLAY_NAME_HEADER, name))
        .to_request();
    let mine: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(mine, vec!["Corrida".to_string()]);
}
