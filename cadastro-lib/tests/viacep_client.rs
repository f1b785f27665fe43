//! Tests for ViaCepClient against a mock address service.
//!
//! The live test is ignored by default. To run it against the real service,
//! optionally set a different endpoint in a `.env` file:
//!
//! ```env
//! CADASTRO_CEP_URL=https://viacep.com.br/ws
//! ```
//!
//! Then run: `cargo test -p cadastro-lib -- --ignored`

use std::env;
use std::time::Duration;

use cadastro_lib::cep::{AddressLookup, Cep, DEFAULT_BASE_URL, ViaCepClient};
use cadastro_lib::error::LookupError;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ViaCepClient {
    ViaCepClient::builder()
        .base_url(format!("{}/ws", server.uri()))
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap()
}

fn cep(value: &str) -> Cep {
    Cep::parse(value).unwrap()
}

#[tokio::test]
async fn lookup_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ws/01001000/json/"))
        .and(header("content-type", "application/json;charset=utf-8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "complemento": "lado ímpar",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP",
            "ibge": "3550308",
            "ddd": "11"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let address = client_for(&server)
        .lookup(&cep("01001-000"))
        .await
        .unwrap()
        .expect("address should be found");

    assert_eq!(address.cep, "01001-000");
    assert_eq!(address.street, "Praça da Sé");
    assert_eq!(address.neighborhood, "Sé");
    assert_eq!(address.city, "São Paulo");
    assert_eq!(address.state, "SP");
}

#[tokio::test]
async fn lookup_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ws/99999999/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"erro": "true"}"#))
        .mount(&server)
        .await;

    let result = client_for(&server).lookup(&cep("99999999")).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn lookup_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Bad Request"))
        .mount(&server)
        .await;

    let err = client_for(&server).lookup(&cep("01001000")).await.unwrap_err();
    assert_eq!(err.status_code(), Some(400));
    assert!(matches!(err, LookupError::Http { ref message, .. } if message == "Bad Request"));
}

#[tokio::test]
async fn lookup_bad_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).lookup(&cep("01001000")).await.unwrap_err();
    match err {
        LookupError::Parse { body, .. } => assert_eq!(body.as_deref(), Some("<html>oops</html>")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn lookup_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"erro": true}"#)
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = ViaCepClient::builder()
        .base_url(format!("{}/ws", server.uri()))
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = client.lookup(&cep("01001000")).await.unwrap_err();
    assert!(matches!(err, LookupError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn lookup_unreachable() {
    // closed port
    let client = ViaCepClient::builder()
        .base_url("http://127.0.0.1:1/ws")
        .build()
        .unwrap();

    let err = client.lookup(&cep("01001000")).await.unwrap_err();
    assert!(matches!(err, LookupError::Network(_)), "got {err:?}");
}

#[tokio::test]
#[ignore = "queries the real address service"]
async fn live_lookup() {
    let _ = dotenvy::dotenv();
    let base_url = env::var("CADASTRO_CEP_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    let client = ViaCepClient::builder()
        .base_url(base_url)
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    let address = client
        .lookup(&cep("01001-000"))
        .await
        .expect("lookup failed")
        .expect("CEP 01001-000 should exist");
    assert_eq!(address.state, "SP");
    assert_eq!(address.city, "São Paulo");
}
