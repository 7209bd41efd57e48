//! Azure provider tests against a mock HTTP server
//!
//! The Azure endpoint comes from an environment variable, so the mock
//! server URI is injected through the environment rather than a config
//! field.

use serial_test::serial;
use termchat::config::AzureConfig;
use termchat::providers::{AzureProvider, CompletionProvider, Message};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY_ENVVAR: &str = "TERMCHAT_WIREMOCK_AZURE_KEY";
const ENDPOINT_ENVVAR: &str = "TERMCHAT_WIREMOCK_AZURE_ENDPOINT";

fn provider_for(server: &MockServer) -> AzureProvider {
    std::env::set_var(KEY_ENVVAR, "azure-key");
    std::env::set_var(ENDPOINT_ENVVAR, server.uri());
    AzureProvider::new(AzureConfig {
        model: "my-deployment".to_string(),
        api_key_envvar: KEY_ENVVAR.to_string(),
        endpoint_envvar: ENDPOINT_ENVVAR.to_string(),
        api_version: "2025-04-01-preview".to_string(),
    })
    .unwrap()
}

#[tokio::test]
#[serial]
async fn test_complete_hits_the_deployment_scoped_route() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/deployments/my-deployment/chat/completions"))
        .and(query_param("api-version", "2025-04-01-preview"))
        .and(header("api-key", "azure-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "From Azure."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let reply = provider
        .complete("my-deployment", &[Message::user("hello")])
        .await
        .unwrap();

    assert_eq!(reply, "From Azure.");
}

#[tokio::test]
#[serial]
async fn test_complete_maps_401_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/deployments/my-deployment/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let error = provider
        .complete("my-deployment", &[Message::user("hello")])
        .await
        .unwrap_err();

    assert!(error.to_string().contains("Authentication"));
}
