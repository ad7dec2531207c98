//! End-to-end tests driving the panel over HTTP.

use std::net::SocketAddr;

use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::StatusCode;

use nginx_panel::auth::Role;
use nginx_panel::HttpServer;

mod common;

async fn spawn_panel(world: &common::TestWorld) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(world.config());
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    addr
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

/// Log in and return the session cookie pair.
async fn login(client: &reqwest::Client, addr: SocketAddr, username: &str, password: &str) -> String {
    let res = client
        .post(format!("http://{addr}/login"))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get("location").unwrap(), "/");
    res.headers()
        .get(SET_COOKIE)
        .expect("login must set the session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn create_save_and_version_flow() {
    let world = common::TestWorld::new();
    world.seed_users(&[("admin", "panel-pass", Role::Admin)]);
    let addr = spawn_panel(&world).await;
    let client = client();
    let cookie = login(&client, addr, "admin", "panel-pass").await;

    // Create from the default skeleton.
    let res = client
        .post(format!("http://{addr}/api/sites"))
        .header(COOKIE, &cookie)
        .json(&serde_json::json!({ "name": "example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Site created: example.com");

    let skeleton = client
        .get(format!("http://{addr}/api/sites/example.com"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(skeleton.contains("server_name example.com;"));

    // A rejected save leaves the file untouched and reports the verdict.
    world.fail_validation(true);
    let res = client
        .put(format!("http://{addr}/api/sites/example.com"))
        .header(COOKIE, &cookie)
        .body("bad{")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.text().await.unwrap();
    assert!(body.contains("nginx -t failed"), "{body}");
    assert!(body.contains("STDERR"), "{body}");

    let unchanged = client
        .get(format!("http://{addr}/api/sites/example.com"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(unchanged, skeleton);

    // A valid save commits and snapshots the prior content.
    world.fail_validation(false);
    let new_content = "server { listen 80; }";
    let res = client
        .put(format!("http://{addr}/api/sites/example.com"))
        .header(COOKIE, &cookie)
        .body(new_content)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Saved and nginx -t OK.");

    let versions: Vec<serde_json::Value> = client
        .get(format!("http://{addr}/api/sites/example.com/versions"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(versions.len(), 1, "one version record after the whole sequence");
    assert_eq!(versions[0]["user"], "admin");

    let version_id = versions[0]["id"].as_str().unwrap();
    let snapshot = client
        .get(format!(
            "http://{addr}/api/sites/example.com/versions/{version_id}"
        ))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(snapshot, skeleton, "the version holds the pre-save content");

    let live = client
        .get(format!("http://{addr}/api/sites/example.com"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(live, new_content);
}

#[tokio::test]
async fn toggle_flow_via_api() {
    let world = common::TestWorld::new();
    world.seed_users(&[("admin", "panel-pass", Role::Admin)]);
    let addr = spawn_panel(&world).await;
    let client = client();
    let cookie = login(&client, addr, "admin", "panel-pass").await;

    client
        .post(format!("http://{addr}/api/sites"))
        .header(COOKIE, &cookie)
        .json(&serde_json::json!({ "name": "example.com" }))
        .send()
        .await
        .unwrap();

    let meta: serde_json::Value = client
        .get(format!("http://{addr}/api/sites/example.com/meta"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(meta["enabled"], false);

    let res = client
        .post(format!("http://{addr}/api/sites/example.com/enable"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let meta: serde_json::Value = client
        .get(format!("http://{addr}/api/sites/example.com/meta"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(meta["enabled"], true);

    let sites: Vec<serde_json::Value> = client
        .get(format!("http://{addr}/api/sites"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let entry = sites
        .iter()
        .find(|s| s["name"] == "example.com")
        .expect("site should be listed");
    assert_eq!(entry["enabled"], true);

    let res = client
        .post(format!("http://{addr}/api/sites/example.com/disable"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    // The link is gone, the available file stays.
    assert!(world.path("available/example.com").exists());
    assert!(!world.path("enabled/example.com").exists());

    let res = client
        .post(format!("http://{addr}/api/sites/example.com/disable"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn roles_gate_the_write_operations() {
    let world = common::TestWorld::new();
    world.seed_users(&[
        ("admin", "admin-pass", Role::Admin),
        ("ops", "ops-pass", Role::Operator),
        ("eye", "eye-pass", Role::Viewer),
    ]);
    let addr = spawn_panel(&world).await;
    let client = client();

    let viewer = login(&client, addr, "eye", "eye-pass").await;
    let operator = login(&client, addr, "ops", "ops-pass").await;

    // Viewers can read but not write.
    let res = client
        .get(format!("http://{addr}/api/sites"))
        .header(COOKIE, &viewer)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .put(format!("http://{addr}/api/sites/example.com"))
        .header(COOKIE, &viewer)
        .body("server {}")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Operators can save but not toggle or reload.
    let res = client
        .put(format!("http://{addr}/api/sites/example.com"))
        .header(COOKIE, &operator)
        .body("server {}")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    for path in [
        "/api/sites/example.com/enable",
        "/api/nginx/reload",
        "/api/backup",
    ] {
        let res = client
            .post(format!("http://{addr}{path}"))
            .header(COOKIE, &operator)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "{path}");
    }

    // /api/me reports the authenticated identity.
    let me: serde_json::Value = client
        .get(format!("http://{addr}/api/me"))
        .header(COOKIE, &operator)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["username"], "ops");
    assert_eq!(me["role"], "operator");
}

#[tokio::test]
async fn unauthenticated_requests_redirect_to_login() {
    let world = common::TestWorld::new();
    let addr = spawn_panel(&world).await;
    let client = client();

    for path in ["/", "/api/sites", "/api/me"] {
        let res = client
            .get(format!("http://{addr}{path}"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(res.headers().get("location").unwrap(), "/login");
    }
}

#[tokio::test]
async fn bad_credentials_bounce_back_to_login() {
    let world = common::TestWorld::new();
    world.seed_users(&[("admin", "panel-pass", Role::Admin)]);
    let addr = spawn_panel(&world).await;
    let client = client();

    let res = client
        .post(format!("http://{addr}/login"))
        .form(&[("username", "admin"), ("password", "wrong")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get("location").unwrap(), "/login?error=1");
    assert!(res.headers().get(SET_COOKIE).is_none());
}

#[tokio::test]
async fn bootstrap_admin_is_seeded_on_first_login() {
    let world = common::TestWorld::new();
    let mut config = world.config();
    config.panel.bootstrap_username = "root".to_string();
    config.panel.bootstrap_password_hash = bcrypt::hash("first-run", 4).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    let client = client();
    let cookie = login(&client, addr, "root", "first-run").await;

    // The seeded user is now persisted and has the admin role.
    assert!(world.path("data/users.json").exists());
    let me: serde_json::Value = client
        .get(format!("http://{addr}/api/me"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["username"], "root");
    assert_eq!(me["role"], "admin");
}

#[tokio::test]
async fn invalid_path_segments_are_rejected_before_io() {
    let world = common::TestWorld::new();
    world.seed_users(&[("admin", "panel-pass", Role::Admin)]);
    let addr = spawn_panel(&world).await;
    let client = client();
    let cookie = login(&client, addr, "admin", "panel-pass").await;

    let res = client
        .get(format!("http://{addr}/api/sites/bad%20name/meta"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(format!("http://{addr}/api/sites"))
        .header(COOKIE, &cookie)
        .json(&serde_json::json!({ "name": "../evil" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Version ids are validated independently of the site name.
    let res = client
        .get(format!(
            "http://{addr}/api/sites/example.com/versions/..%2Fescape"
        ))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn templates_drive_site_creation() {
    let world = common::TestWorld::new();
    world.seed_users(&[("admin", "panel-pass", Role::Admin)]);
    world.write_templates(&serde_json::json!([{
        "id": "proxy",
        "name": "Reverse proxy",
        "content": "server {\n    server_name {{domain}};\n    location / { proxy_pass http://127.0.0.1:3000; }\n}\n",
    }]));
    let addr = spawn_panel(&world).await;
    let client = client();
    let cookie = login(&client, addr, "admin", "panel-pass").await;

    let templates: Vec<serde_json::Value> = client
        .get(format!("http://{addr}/api/templates"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0]["id"], "proxy");

    let res = client
        .post(format!("http://{addr}/api/sites"))
        .header(COOKIE, &cookie)
        .json(&serde_json::json!({ "name": "tpl.example.com", "templateId": "proxy" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let content = client
        .get(format!("http://{addr}/api/sites/tpl.example.com"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(content.contains("server_name tpl.example.com;"), "{content}");

    // Creating the same site again conflicts.
    let res = client
        .post(format!("http://{addr}/api/sites"))
        .header(COOKIE, &cookie)
        .json(&serde_json::json!({ "name": "tpl.example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn log_tailing_returns_the_requested_window() {
    let world = common::TestWorld::new();
    world.seed_users(&[("admin", "panel-pass", Role::Admin)]);
    let lines: Vec<String> = (1..=10).map(|i| format!("request {i}")).collect();
    std::fs::write(world.path("logs/access.log"), lines.join("\n") + "\n").unwrap();
    let addr = spawn_panel(&world).await;
    let client = client();
    let cookie = login(&client, addr, "admin", "panel-pass").await;

    let res = client
        .get(format!("http://{addr}/api/logs?lines=3"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert_eq!(body, "request 8\nrequest 9\nrequest 10\n");

    // The error log was never written.
    let res = client
        .get(format!("http://{addr}/api/logs?type=error"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn backup_endpoints_round_trip() {
    let world = common::TestWorld::new();
    world.seed_users(&[("admin", "panel-pass", Role::Admin)]);
    std::fs::write(world.path("conf-root/nginx.conf"), "events {}\n").unwrap();
    let addr = spawn_panel(&world).await;
    let client = client();
    let cookie = login(&client, addr, "admin", "panel-pass").await;

    let created: serde_json::Value = client
        .post(format!("http://{addr}/api/backup"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["ok"], true);
    let file = created["file"].as_str().unwrap().to_string();

    let list: Vec<String> = client
        .get(format!("http://{addr}/api/backup"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.first(), Some(&file));

    let res = client
        .get(format!("http://{addr}/api/backup/{file}"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "application/gzip"
    );
    assert!(!res.bytes().await.unwrap().is_empty());

    let res = client
        .get(format!("http://{addr}/api/backup/missing_nginx-backup.tar.gz"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
