use actix_web::{test, web, App};
use gatehouse::{configure, cors_policy, static_files, AppState, GatewayConfig};
use std::fs;

fn client_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "<html><body>profile</body></html>").unwrap();
    fs::write(dir.path().join("index.js"), "console.log('hi');").unwrap();
    dir
}

fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(GatewayConfig {
        api_endpoint: "http://127.0.0.1:1/graphql".into(),
        auth_endpoint: "http://127.0.0.1:1/signin".into(),
        ..GatewayConfig::default()
    }))
}

#[actix_web::test]
async fn serves_client_bundle() {
    let dir = client_dir();
    let app = test::init_service(
        App::new()
            .wrap(cors_policy())
            .app_data(state())
            .configure(configure)
            .service(static_files(dir.path())),
    )
    .await;

    let req = test::TestRequest::get().uri("/index.js").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(&test::read_body(resp).await[..], b"console.log('hi');");

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(&test::read_body(resp).await[..], b"<html><body>profile</body></html>");

    let req = test::TestRequest::get().uri("/missing.js").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn api_routes_take_precedence_over_static() {
    let dir = client_dir();
    fs::create_dir_all(dir.path().join("api/proxy")).unwrap();
    fs::write(dir.path().join("api/proxy/graphql"), "shadow").unwrap();
    let app = test::init_service(
        App::new().app_data(state()).configure(configure).service(static_files(dir.path())),
    )
    .await;
    let req = test::TestRequest::post().uri("/api/proxy/graphql").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn unmatched_api_paths_and_methods_reach_static_files() {
    let dir = client_dir();
    fs::create_dir_all(dir.path().join("api/auth")).unwrap();
    fs::write(dir.path().join("api/data.json"), r#"{"skills":[]}"#).unwrap();
    fs::write(dir.path().join("api/auth/signin"), "static signin page").unwrap();
    let app = test::init_service(
        App::new()
            .wrap(cors_policy())
            .app_data(state())
            .configure(configure)
            .service(static_files(dir.path())),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/data.json").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(&test::read_body(resp).await[..], br#"{"skills":[]}"#);

    // only POST is relayed; a GET on the same path is a plain file lookup
    let req = test::TestRequest::get().uri("/api/auth/signin").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(&test::read_body(resp).await[..], b"static signin page");

    let req = test::TestRequest::get().uri("/api/nothing-here").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn preflight_allows_any_origin() {
    let app = test::init_service(App::new().wrap(cors_policy()).app_data(state()).configure(configure)).await;
    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/proxy/graphql")
        .insert_header(("Origin", "http://example.com"))
        .insert_header(("Access-Control-Request-Method", "POST"))
        .insert_header(("Access-Control-Request-Headers", "authorization, content-type"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert_eq!(resp.headers().get("access-control-allow-origin").unwrap(), "*");
    let methods = resp.headers().get("access-control-allow-methods").unwrap().to_str().unwrap().to_string();
    assert!(methods.contains("POST"));
    assert!(methods.contains("GET"));
}

#[actix_web::test]
async fn cors_headers_on_local_errors() {
    let app = test::init_service(App::new().wrap(cors_policy()).app_data(state()).configure(configure)).await;
    let req = test::TestRequest::post()
        .uri("/api/auth/signin")
        .insert_header(("Origin", "http://localhost:5173"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert_eq!(resp.headers().get("access-control-allow-origin").unwrap(), "*");
}

#[actix_web::test]
async fn openapi_lists_both_relays() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
    let req = test::TestRequest::get().uri("/api/openapi.json").to_request();
    let doc: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert!(doc["paths"].get("/api/auth/signin").is_some());
    assert!(doc["paths"].get("/api/proxy/graphql").is_some());
    assert!(doc["components"]["schemas"].get("ApiErrorBody").is_some());
}
