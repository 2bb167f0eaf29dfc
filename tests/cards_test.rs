use investec_client::models::{ExecutionType, SimulateExecutionInput};
use investec_client::{Card, Client, Error, InvestecConfig};
use serde_json::{Map, Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn authenticated_client(mock_server: &MockServer) -> Client {
    Mock::given(method("POST"))
        .and(path("/identity/v2/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok1",
            "token_type": "Bearer",
            "expires_in": 1800,
            "scope": "accounts"
        })))
        .mount(mock_server)
        .await;

    let config = InvestecConfig::new("abc", "xyz", "k1")
        .with_sandbox(true)
        .with_base_url(mock_server.uri());
    Client::connect(&config).await.unwrap()
}

fn envelope(data: Value) -> Value {
    json!({
        "data": data,
        "links": { "self": null },
        "meta": { "totalPages": 1 }
    })
}

fn code_result(code: &str) -> Value {
    envelope(json!({
        "result": {
            "codeId": "C1",
            "code": code,
            "createdAt": "2024-01-01T10:00:00Z",
            "updatedAt": "2024-01-02T10:00:00Z",
            "publishedAt": null,
            "error": null
        }
    }))
}

async fn first_card(client: &Client, mock_server: &MockServer) -> Card {
    Mock::given(method("GET"))
        .and(path("/za/v1/cards"))
        .and(header("authorization", "Bearer tok1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "cards": [
                {
                    "CardKey": "123",
                    "CardNumber": "402167xxxxxx0001",
                    "IsProgrammable": true,
                    "Status": "Active",
                    "CardTypeCode": "VGC",
                    "AccountNumber": "10010206147",
                    "AccountId": "A1"
                }
            ]
        }))))
        .mount(mock_server)
        .await;

    client.cards().await.unwrap().remove(0)
}

#[tokio::test]
async fn test_list_cards() {
    let mock_server = MockServer::start().await;
    let client = authenticated_client(&mock_server).await;

    let card = first_card(&client, &mock_server).await;

    assert_eq!(card.key(), "123");
    assert!(card.details().is_programmable);
    assert_eq!(card.details().account_id, "A1");
}

#[tokio::test]
async fn test_saved_and_published_code() {
    let mock_server = MockServer::start().await;
    let client = authenticated_client(&mock_server).await;
    let card = first_card(&client, &mock_server).await;

    Mock::given(method("GET"))
        .and(path("/za/v1/cards/123/code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(code_result("// saved")))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/za/v1/cards/123/publishedcode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(code_result("// published")))
        .mount(&mock_server)
        .await;

    let saved = card.saved_code().await.unwrap();
    assert_eq!(saved.code, "// saved");
    assert_eq!(saved.code_id, "C1");
    assert!(saved.published_at.is_none());

    let published = card.published_code().await.unwrap();
    assert_eq!(published.code, "// published");
}

#[tokio::test]
async fn test_update_and_publish_code() {
    let mock_server = MockServer::start().await;
    let client = authenticated_client(&mock_server).await;
    let card = first_card(&client, &mock_server).await;

    Mock::given(method("POST"))
        .and(path("/za/v1/cards/123/code"))
        .and(body_json(json!({ "code": "// new" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(code_result("// new")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/za/v1/cards/123/code"))
        .and(body_json(json!({ "codeid": "C1", "code": "" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(code_result("// new")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let saved = card.update_saved_code("// new").await.unwrap();
    assert_eq!(saved.code, "// new");

    let published = card.publish_saved_code(&saved.code_id).await.unwrap();
    assert_eq!(published.code_id, "C1");
}

#[tokio::test]
async fn test_simulate_execution() {
    let mock_server = MockServer::start().await;
    let client = authenticated_client(&mock_server).await;
    let card = first_card(&client, &mock_server).await;

    let input = SimulateExecutionInput {
        code: "const beforeTransaction = async (authorization) => true;".to_string(),
        cents_amount: "10000".to_string(),
        currency_code: "zar".to_string(),
        merchant_code: 7996,
        merchant_city: "Durbanville".to_string(),
        country_code: "ZA".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/za/v1/cards/123/code/execute"))
        .and(body_json(json!({
            "code": "const beforeTransaction = async (authorization) => true;",
            "centsAmount": "10000",
            "currencyCode": "zar",
            "merchantCode": 7996,
            "merchantCity": "Durbanville",
            "countryCode": "ZA"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "result": [
                {
                    "executionId": "E1",
                    "rootCodeFunctionId": "F1",
                    "sandbox": true,
                    "type": "before_transaction",
                    "authorizationApproved": true,
                    "logs": [],
                    "smsCount": 0,
                    "emailCount": 0,
                    "pushNotificationCount": 0,
                    "createdAt": "2024-01-01T10:00:00Z",
                    "startedAt": "2024-01-01T10:00:00Z",
                    "completedAt": "2024-01-01T10:00:01Z",
                    "updatedAt": "2024-01-01T10:00:01Z"
                },
                {
                    "executionId": "E2",
                    "rootCodeFunctionId": "F1",
                    "sandbox": true,
                    "type": "after_transaction",
                    "authorizationApproved": null,
                    "logs": [{ "createdAt": "2024-01-01T10:00:02Z", "level": "info", "content": "done" }]
                }
            ]
        }))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let executions = card.simulate_execution(&input).await.unwrap();

    assert_eq!(executions.len(), 2);
    assert_eq!(executions[0].type_, ExecutionType::BeforeTransaction);
    assert_eq!(executions[0].authorization_approved, Some(true));
    assert_eq!(executions[1].type_, ExecutionType::AfterTransaction);
    assert_eq!(executions[1].logs[0].content, "done");
}

#[tokio::test]
async fn test_executions_failure_names_card() {
    let mock_server = MockServer::start().await;
    let client = authenticated_client(&mock_server).await;
    let card = first_card(&client, &mock_server).await;

    Mock::given(method("GET"))
        .and(path("/za/v1/cards/123/code/executions"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let err = card.executions().await.unwrap_err();
    match err {
        Error::Provider {
            context, status, ..
        } => {
            assert!(context.contains("card_key=123"));
            assert_eq!(status, 403);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_environment_variables() {
    let mock_server = MockServer::start().await;
    let client = authenticated_client(&mock_server).await;
    let card = first_card(&client, &mock_server).await;

    Mock::given(method("GET"))
        .and(path("/za/v1/cards/123/environmentvariables"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "result": {
                "variables": { "limit": 500 },
                "createdAt": "2024-01-01T10:00:00Z",
                "updatedAt": "2024-01-01T10:00:00Z",
                "error": null
            }
        }))))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/za/v1/cards/123/environmentvariables"))
        .and(body_json(json!({ "variables": { "limit": 750, "blocked": ["7995"] } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "result": {
                "variables": { "limit": 750, "blocked": ["7995"] }
            }
        }))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let current = card.environment_variables().await.unwrap();
    assert_eq!(current.variables["limit"], 500);

    let mut variables = Map::new();
    variables.insert("limit".to_string(), json!(750));
    variables.insert("blocked".to_string(), json!(["7995"]));
    let updated = card.update_environment_variables(&variables).await.unwrap();

    assert_eq!(updated.variables, variables);
}

#[tokio::test]
async fn test_lookup_lists() {
    let mock_server = MockServer::start().await;
    let client = authenticated_client(&mock_server).await;

    for (list, code, name) in [
        ("countries", "ZA", "South Africa"),
        ("currencies", "ZAR", "Rand"),
        ("merchants", "5462", "Bakeries"),
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/za/v1/cards/{list}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
                "result": [{ "Code": code, "Name": name }]
            }))))
            .mount(&mock_server)
            .await;
    }

    assert_eq!(client.card_countries().await.unwrap()[0].code, "ZA");
    assert_eq!(client.card_currencies().await.unwrap()[0].name, "Rand");
    assert_eq!(client.card_merchants().await.unwrap()[0].code, "5462");
}
