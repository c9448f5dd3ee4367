use std::time::Duration;

use travelbot::ai::remote_config::{ApiKeySource, RemoteConfigClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetches_key_once_within_interval() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"api_key":"secret","other_flag":true}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = RemoteConfigClient::new(
        format!("{}/config", server.uri()),
        Duration::from_secs(3600),
    );
    assert_eq!(client.fetch_api_key().await.unwrap(), "secret");
    assert_eq!(client.fetch_api_key().await.unwrap(), "secret");
    server.verify().await;
}

#[tokio::test]
async fn refetches_after_interval() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"api_key":"secret"}"#, "application/json"),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = RemoteConfigClient::new(format!("{}/config", server.uri()), Duration::ZERO);
    client.fetch_api_key().await.unwrap();
    client.fetch_api_key().await.unwrap();
    server.verify().await;
}

#[tokio::test]
async fn missing_key_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"api_key":"  "}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let client = RemoteConfigClient::new(
        format!("{}/config", server.uri()),
        Duration::from_secs(3600),
    );
    let err = client.fetch_api_key().await.unwrap_err();
    assert!(err.to_string().contains("api_key"));
}

#[tokio::test]
async fn failed_fetch_is_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"api_key":"later"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let client = RemoteConfigClient::new(
        format!("{}/config", server.uri()),
        Duration::from_secs(3600),
    );
    assert!(client.fetch_api_key().await.is_err());
    assert_eq!(client.fetch_api_key().await.unwrap(), "later");
}
