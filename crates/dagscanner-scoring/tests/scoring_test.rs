use dagscanner_core::error::Error;
use dagscanner_core::traits::ScoringBackend;
use dagscanner_scoring::{ScoringClient, ScoringConfig};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> ScoringClient {
    ScoringClient::new(ScoringConfig::new(format!("{}/api/analyze", server.uri()))).unwrap()
}

#[tokio::test]
async fn successful_analysis_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .and(body_json(json!({ "address": "0xABC...123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": "0xABC...123",
            "score": 82,
            "status": "Secure"
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).await.analyze("0xABC...123").await.unwrap();
    assert_eq!(result.address, "0xABC...123");
    assert_eq!(result.score, 82);
    assert_eq!(result.status, "Secure");
}

#[tokio::test]
async fn input_is_trimmed_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({ "address": "0xabc" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": "0xabc",
            "score": 10,
            "status": "Risk"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).await.analyze("  0xabc  ").await.unwrap();
    assert_eq!(result.address, "0xabc");
}

#[tokio::test]
async fn backend_error_carries_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({ "error": "rate limited" })))
        .mount(&server)
        .await;

    let err = client_for(&server).await.analyze("0xabc").await.unwrap_err();
    assert_eq!(
        err,
        Error::BackendError {
            status: 429,
            message: "rate limited".to_string()
        }
    );
}

#[tokio::test]
async fn unparseable_error_body_falls_back_to_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server).await.analyze("0xabc").await.unwrap_err();
    assert_eq!(
        err,
        Error::BackendError {
            status: 502,
            message: "erro do backend".to_string()
        }
    );
}

#[tokio::test]
async fn empty_input_never_reaches_the_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert_eq!(client.analyze("").await.unwrap_err(), Error::EmptyInput);
    assert_eq!(client.analyze("   ").await.unwrap_err(), Error::EmptyInput);
}

#[tokio::test]
async fn transport_failure_is_a_network_error() {
    // Porta 9 (discard): conexão recusada
    let client = ScoringClient::new(ScoringConfig::new("http://127.0.0.1:9/api/analyze")).unwrap();
    let err = client.analyze("0xabc").await.unwrap_err();
    assert!(matches!(err, Error::NetworkError(_)));
}

#[tokio::test]
async fn out_of_range_score_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": "0xabc",
            "score": 250,
            "status": "Secure"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).await.analyze("0xabc").await.unwrap_err();
    assert!(matches!(err, Error::NetworkError(_)));
}

#[test]
fn missing_endpoint_fails_closed() {
    assert!(matches!(
        ScoringClient::new(ScoringConfig::new("")),
        Err(Error::NetworkError(_))
    ));
    assert!(matches!(
        ScoringClient::new(ScoringConfig::new("   ")),
        Err(Error::NetworkError(_))
    ));
}
