//! Integration tests for the Steam Web API client.
//!
//! A wiremock server stands in for the Steam host so the full wire
//! protocol is exercised: status handling, the embedded error envelope,
//! soft ticket rejection, and payload parsing.

use game_lobby::steam::{SteamClient, SteamConfig, SteamError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TICKET_PATH: &str = "/ISteamUserAuth/AuthenticateUserTicket/v1/";
const SUMMARY_PATH: &str = "/ISteamUser/GetPlayerSummaries/v2/";

async fn client_for(server: &MockServer) -> SteamClient {
    let mut config = SteamConfig::new("480".to_string(), "test-api-key".to_string());
    config.api_url = server.uri();
    SteamClient::new(config).expect("client should build")
}

#[tokio::test]
async fn test_authenticate_ticket_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TICKET_PATH))
        .and(query_param("appid", "480"))
        .and(query_param("key", "test-api-key"))
        .and(query_param("ticket", "valid-ticket"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "params": {
                    "result": "OK",
                    "steamid": "76561197960287930",
                    "ownersteamid": "76561197960287930",
                    "vacbanned": false,
                    "publisherbanned": false
                }
            }
        })))
        .mount(&server)
        .await;

    let identity = client_for(&server)
        .await
        .authenticate_user_ticket("valid-ticket")
        .await
        .expect("ticket should verify");

    assert_eq!(identity.steam_id, "76561197960287930");
    assert!(!identity.banned());
}

#[tokio::test]
async fn test_authenticate_ticket_surfaces_ban_flags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TICKET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "params": {
                    "result": "OK",
                    "steamid": "76561197960287930",
                    "vacbanned": true,
                    "publisherbanned": false
                }
            }
        })))
        .mount(&server)
        .await;

    let identity = client_for(&server)
        .await
        .authenticate_user_ticket("t")
        .await
        .unwrap();
    assert!(identity.vac_banned);
    assert!(identity.banned());
}

#[tokio::test]
async fn test_authenticate_ticket_soft_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TICKET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "params": {
                    "result": "Expired",
                    "steamid": "0",
                    "vacbanned": false,
                    "publisherbanned": false
                }
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .authenticate_user_ticket("stale-ticket")
        .await
        .expect_err("non-OK result must fail");

    assert!(err.is_semantic(), "a soft rejection is not a transport error");
    match err {
        SteamError::TicketRejected(result) => assert_eq!(result, "Expired"),
        other => panic!("expected TicketRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_envelope_on_http_200() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TICKET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "error": {
                    "errorcode": 101,
                    "errordesc": "Invalid ticket"
                }
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .authenticate_user_ticket("bad-ticket")
        .await
        .expect_err("embedded error object must fail the call");

    match err {
        SteamError::Api { code, desc } => {
            assert_eq!(code, 101);
            assert_eq!(desc, "Invalid ticket");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_success_status_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TICKET_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .authenticate_user_ticket("ticket")
        .await
        .expect_err("503 must fail");

    assert!(matches!(err, SteamError::Status(503)));
    assert!(!err.is_semantic());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TICKET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .authenticate_user_ticket("ticket")
        .await
        .expect_err("garbage body must fail");
    assert!(matches!(err, SteamError::Decode(_)));
}

#[tokio::test]
async fn test_get_player_summary_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SUMMARY_PATH))
        .and(query_param("key", "test-api-key"))
        .and(query_param("steamids", "76561197960287930"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "players": [{
                    "steamid": "76561197960287930",
                    "personaname": "Player One",
                    "avatar": "http://img/small.jpg",
                    "avatarmedium": "http://img/medium.jpg",
                    "avatarfull": "http://img/full.jpg"
                }]
            }
        })))
        .mount(&server)
        .await;

    let summary = client_for(&server)
        .await
        .get_player_summary("76561197960287930")
        .await
        .expect("summary should parse");

    assert_eq!(summary.persona_name, "Player One");
    assert_eq!(summary.avatar_url(), Some("http://img/full.jpg"));
}

#[tokio::test]
async fn test_get_player_summary_unknown_player() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SUMMARY_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "response": { "players": [] } })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .get_player_summary("999")
        .await
        .expect_err("zero players must fail");

    assert!(matches!(err, SteamError::UnknownPlayer(id) if id == "999"));
}
