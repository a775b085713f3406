use fxcall::core::config::{AppConfig, Config, Credentials};
use std::fs;
use tracing::info;

mod test_utils {
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_rates_mock_server(symbols: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/latest"))
            .and(query_param("access_key", "rates-key"))
            .and(query_param("symbols", symbols))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub async fn create_gemini_mock_server(parts: Value) -> MockServer {
        let mock_server = MockServer::start().await;
        let mock_response = json!({
            "candidates": [{
                "content": {"role": "model", "parts": parts},
                "finishReason": "STOP"
            }]
        });

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(query_param("key", "gemini-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_response))
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }
}

fn write_config(rates_uri: &str, gemini_uri: &str) -> tempfile::NamedTempFile {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
        providers:
          exchange_rates:
            base_url: {rates_uri}
          gemini:
            base_url: {gemini_uri}
            model: gemini-1.5-flash
    "#
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");
    config_file
}

fn load_config(config_file: &tempfile::NamedTempFile) -> Config {
    Config {
        app: AppConfig::load_from_path(config_file.path()).expect("Failed to load config"),
        credentials: Credentials {
            google_api_key: "gemini-key".to_string(),
            exchange_rate_api_key: "rates-key".to_string(),
        },
    }
}

#[test_log::test(tokio::test)]
async fn test_full_query_flow_with_mocks() {
    let rates_server = test_utils::create_rates_mock_server(
        "USD,INR",
        r#"{"success": true, "base": "EUR", "rates": {"USD": 1.0, "INR": 83.0}}"#,
    )
    .await;
    let gemini_server = test_utils::create_gemini_mock_server(serde_json::json!([
        {"text": "Converting 100 USD to INR."},
        {"functionCall": {
            "name": "convert_currency",
            "args": {"amount": 100.0, "base_currency": "USD", "target_currency": "INR"}
        }}
    ]))
    .await;

    let config_file = write_config(&rates_server.uri(), &gemini_server.uri());
    let config = load_config(&config_file);

    let lines = fxcall::run_query(&config, "100 USD to INR")
        .await
        .expect("Query failed");
    info!(?lines, "Received answer");

    assert_eq!(
        lines,
        vec![
            "Converting 100 USD to INR.".to_string(),
            "The converted amount is: 8300.00 INR".to_string(),
        ]
    );
}

#[test_log::test(tokio::test)]
async fn test_query_with_unknown_currency() {
    let rates_server =
        test_utils::create_rates_mock_server("USD,XYZ", r#"{"rates": {"USD": 1.0}}"#).await;
    let gemini_server = test_utils::create_gemini_mock_server(serde_json::json!([
        {"functionCall": {
            "name": "convert_currency",
            "args": {"amount": 5, "base_currency": "USD", "target_currency": "XYZ"}
        }}
    ]))
    .await;

    let config_file = write_config(&rates_server.uri(), &gemini_server.uri());
    let config = load_config(&config_file);

    let lines = fxcall::run_query(&config, "5 USD to XYZ")
        .await
        .expect("Query failed");
    assert_eq!(
        lines,
        vec!["Invalid currency codes: USD or XYZ. Please check your input.".to_string()]
    );
}

#[test_log::test(tokio::test)]
async fn test_query_without_amount_uses_default() {
    let rates_server = test_utils::create_rates_mock_server(
        "EUR,JPY",
        r#"{"rates": {"EUR": 1.0, "JPY": 162.456}}"#,
    )
    .await;
    let gemini_server = test_utils::create_gemini_mock_server(serde_json::json!([
        {"functionCall": {
            "name": "convert_currency",
            "args": {"base_currency": "EUR", "target_currency": "JPY"}
        }}
    ]))
    .await;

    let config_file = write_config(&rates_server.uri(), &gemini_server.uri());
    let config = load_config(&config_file);

    let lines = fxcall::run_query(&config, "EUR to JPY")
        .await
        .expect("Query failed");
    assert_eq!(
        lines,
        vec!["The converted amount is: 162.46 JPY".to_string()]
    );
}

#[test_log::test(tokio::test)]
async fn test_model_error_fails_query() {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let gemini_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&gemini_server)
        .await;

    let config_file = write_config("http://127.0.0.1:9", &gemini_server.uri());
    let config = load_config(&config_file);

    let err = fxcall::run_query(&config, "1 USD to INR")
        .await
        .expect_err("Query should fail");
    assert_eq!(
        format!("{err:#}"),
        "Failed to get a reply from the model: Model request failed with HTTP 500 Internal Server Error: upstream down"
    );
}
