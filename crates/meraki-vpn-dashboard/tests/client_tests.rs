//! HTTP-level tests for the dashboard client against a local mock server

use meraki_vpn_dashboard::{
    ClientOptions, CreateAuthUserRequest, DashboardApi, DashboardClient, DashboardError,
};
use meraki_vpn_types::{Action, FailureReason};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> DashboardClient {
    let options = ClientOptions {
        base_url: server.uri(),
        ..ClientOptions::default()
    };
    DashboardClient::new("test-api-key", options).expect("client builds")
}

#[tokio::test]
async fn test_list_organizations_sends_bearer_key() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .and(header("authorization", "Bearer test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "2930418", "name": "My organization", "url": "https://dashboard.meraki.com/o/VjjsAd/manage/organization/overview"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let organizations = client_for(&server).list_organizations().await?;
    assert_eq!(organizations.len(), 1);
    assert_eq!(organizations[0].id, "2930418");
    assert_eq!(organizations[0].name, "My organization");

    Ok(())
}

#[tokio::test]
async fn test_invalid_key_is_reported_as_auth_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"errors": ["Invalid API key"]})))
        .mount(&server)
        .await;

    let err = client_for(&server).list_organizations().await.unwrap_err();
    assert!(matches!(err, DashboardError::Unauthorized(401)));
    assert!(err.is_auth_rejection());
}

#[tokio::test]
async fn test_forbidden_key_is_an_auth_rejection_too() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"errors": ["Forbidden"]})))
        .mount(&server)
        .await;

    let err = client_for(&server).list_organizations().await.unwrap_err();
    assert!(matches!(err, DashboardError::Unauthorized(403)));
    assert!(matches!(err.classify(Action::Provision), FailureReason::Transport(_)));
}

#[tokio::test]
async fn test_network_listing_follows_pagination() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start().await;
    let next = format!("{}/organizations/1/networks?perPage=1000&startingAfter=N_1", server.uri());

    Mock::given(method("GET"))
        .and(path("/organizations/1/networks"))
        .and(query_param("startingAfter", "N_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "N_2", "organizationId": "1", "name": "Lab"}
        ])))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations/1/networks"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", format!("<{}>; rel=next", next).as_str())
                .set_body_json(json!([
                    {"id": "N_1", "organizationId": "1", "name": "HQ"}
                ])),
        )
        .mount(&server)
        .await;

    let networks = client_for(&server).list_networks("1").await?;
    let ids: Vec<&str> = networks.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["N_1", "N_2"]);

    Ok(())
}

#[tokio::test]
async fn test_list_devices() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations/1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"serial": "Q234-ABCD-5678", "model": "MX68", "networkId": "N_1", "name": "edge"},
            {"serial": "Q234-ABCD-0001", "model": "MR46", "networkId": null}
        ])))
        .mount(&server)
        .await;

    let devices = client_for(&server).list_devices("1").await?;
    assert_eq!(devices.len(), 2);
    assert!(devices[0].is_security_appliance());
    assert_eq!(devices[1].network_id, None);

    Ok(())
}

#[tokio::test]
async fn test_create_auth_user_posts_client_vpn_payload() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/networks/N_1/merakiAuthUsers"))
        .and(body_partial_json(json!({
            "email": "ann@example.com",
            "name": "Ann",
            "accountType": "Client VPN",
            "emailPasswordToUser": true,
            "authorizations": [{"ssidNumber": 0, "authorizedZone": "HQ - appliance", "expiresAt": "Never"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "YW5uQGV4YW1wbGUuY29t",
            "email": "ann@example.com",
            "name": "Ann",
            "accountType": "Client VPN",
            "authorizations": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateAuthUserRequest::client_vpn(
        "Ann",
        "ann@example.com",
        "correct-horse",
        "HQ - appliance".to_string(),
        true,
    );
    let user = client_for(&server).create_auth_user("N_1", &request).await?;
    assert_eq!(user.id, "YW5uQGV4YW1wbGUuY29t");

    Ok(())
}

#[tokio::test]
async fn test_create_conflict_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/networks/N_1/merakiAuthUsers"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": ["Email ann@example.com already exists"]
        })))
        .mount(&server)
        .await;

    let request = CreateAuthUserRequest::client_vpn("Ann", "ann@example.com", "pw", "HQ - appliance".to_string(), true);
    let err = client_for(&server).create_auth_user("N_1", &request).await.unwrap_err();
    match &err {
        DashboardError::Api { status, errors } => {
            assert_eq!(*status, 400);
            assert_eq!(errors, &vec!["Email ann@example.com already exists".to_string()]);
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(err.classify(Action::Provision), FailureReason::AlreadyExists);
}

#[tokio::test]
async fn test_plain_text_error_body_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/networks/N_9/merakiAuthUsers"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_auth_users("N_9").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.classify(Action::Deauthorize), FailureReason::UserNotFound);
}

#[tokio::test]
async fn test_revoke_authorization_issues_delete() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/networks/N_1/merakiAuthUsers/YW5u"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).revoke_authorization("N_1", "YW5u").await?;

    Ok(())
}

#[tokio::test]
async fn test_undecodable_body_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_organizations().await.unwrap_err();
    assert!(matches!(err, DashboardError::Decode(_)));
    assert!(matches!(err.classify(Action::Provision), FailureReason::Transport(_)));
}
