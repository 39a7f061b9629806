use nick_backend::config::{Config, LoggingConfig};
use nick_backend::server::{Server, Site};
use nick_backend::status::{StatusResponse, GREETING};
use nick_backend::App;

fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

fn quiet_logging() -> LoggingConfig {
    LoggingConfig {
        level: "warn".to_string(),
        access_log: false,
        access_log_format: "combined".to_string(),
    }
}

fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

async fn start_status_server() -> nick_backend::server::RunningServer {
    Server::bind("127.0.0.1:0".parse().unwrap(), Site::Status, quiet_logging())
        .unwrap()
        .start()
        .unwrap()
}

#[tokio::test]
async fn get_root_returns_greeting_json() {
    let server = start_status_server().await;
    let url = format!("http://{}/", server.local_addr());

    let response = http_client().get(&url).send().await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        "application/json"
    );
    let body: StatusResponse = response.json().await.unwrap();
    assert_eq!(body.message, GREETING);
    assert!(!body.message.is_empty());

    server.stop().await.unwrap();
}

#[tokio::test]
async fn sequential_requests_are_identical() {
    let server = start_status_server().await;
    let url = format!("http://{}/", server.local_addr());
    let client = http_client();

    let mut bodies = Vec::new();
    for _ in 0..5 {
        let response = client.get(&url).send().await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        bodies.push(response.text().await.unwrap());
    }
    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn other_paths_and_methods_are_rejected() {
    let server = start_status_server().await;
    let base = format!("http://{}", server.local_addr());
    let client = http_client();

    let missing = client.get(format!("{base}/missing")).send().await.unwrap();
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    let post = client.post(format!("{base}/")).body("{}").send().await.unwrap();
    assert_eq!(post.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(post.headers()[reqwest::header::ALLOW], "GET, HEAD");

    let head = client.head(format!("{base}/")).send().await.unwrap();
    assert_eq!(head.status(), reqwest::StatusCode::OK);
    assert!(head.text().await.unwrap().is_empty());

    server.stop().await.unwrap();
}

#[tokio::test]
async fn stopped_server_refuses_connections() {
    let server = start_status_server().await;
    let url = format!("http://{}/", server.local_addr());
    server.stop().await.unwrap();

    assert!(http_client().get(&url).send().await.is_err());
}

#[tokio::test]
async fn stop_closes_pooled_connections() {
    let server = start_status_server().await;
    let url = format!("http://{}/", server.local_addr());
    let client = http_client();

    let first = client.get(&url).send().await.unwrap();
    assert_eq!(first.status(), reqwest::StatusCode::OK);
    first.text().await.unwrap();

    server.stop().await.unwrap();

    // The pooled keep-alive connection is gone along with the listener
    assert!(client.get(&url).send().await.is_err());
}

#[tokio::test]
async fn port_env_selects_bound_port() {
    let port = free_port();
    let env = [
        ("PORT".to_string(), port.to_string()),
        ("NICK_DASHBOARD__ENABLED".to_string(), "false".to_string()),
        ("NICK_LOGGING__ACCESS_LOG".to_string(), "false".to_string()),
    ]
    .into_iter()
    .collect();
    let config = Config::load_from("tests/no-such-config", &env).unwrap();

    let app = App::start(&config).unwrap();
    assert_eq!(app.status_addr().port(), port);
    assert!(app.dashboard_addr().is_none());

    let body: StatusResponse = http_client()
        .get(format!("http://127.0.0.1:{port}/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body.message, GREETING);

    app.stop().await.unwrap();
}
