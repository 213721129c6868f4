use doortime_core::prelude::*;
use doortime_core::ProviderError;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROUTE_PATH: &str = "/directions/v5/mapbox/walking/-79.9532,40.4443;-79.9585,40.44279";

fn cathedral_lawn() -> Coordinate {
    Coordinate::new(40.4443, -79.9532).unwrap()
}

fn public_health_door() -> Coordinate {
    Coordinate::new(40.44279, -79.9585).unwrap()
}

fn provider_for(server: &MockServer) -> MapboxDirections {
    MapboxDirections::new(MapboxConfig {
        access_token: Some("pk.test".to_string()),
        base_url: server.uri(),
        timeout_secs: Some(5),
    })
    .unwrap()
}

async fn mount(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .and(query_param("access_token", "pk.test"))
        .and(query_param("alternatives", "false"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

async fn walk(provider: &MapboxDirections) -> Result<Seconds, ProviderError> {
    provider
        .walking_duration(
            cathedral_lawn(),
            public_health_door(),
            &OutdoorParams::default(),
        )
        .await
}

#[tokio::test]
async fn returns_first_route_duration() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "code": "Ok",
            "routes": [{"duration": 412.7, "distance": 520.1}]
        })),
    )
    .await;

    assert_eq!(walk(&provider_for(&server)).await, Ok(412.7));
}

#[tokio::test]
async fn unauthorized_status_carries_upstream_message() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(401).set_body_json(json!({
            "message": "Not Authorized - Invalid Token"
        })),
    )
    .await;

    let Err(ProviderError::RouteNotFound(message)) = walk(&provider_for(&server)).await else {
        panic!("expected RouteNotFound");
    };
    assert!(message.contains("401"), "{message}");
    assert!(message.contains("Not Authorized - Invalid Token"), "{message}");
}

#[tokio::test]
async fn no_route_code_is_route_not_found() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "code": "NoRoute",
            "message": "No route found",
            "routes": []
        })),
    )
    .await;

    let Err(ProviderError::RouteNotFound(message)) = walk(&provider_for(&server)).await else {
        panic!("expected RouteNotFound");
    };
    assert!(message.contains("NoRoute"), "{message}");
}

#[tokio::test]
async fn route_without_duration_is_an_error() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "code": "Ok",
            "routes": [{"distance": 520.1}]
        })),
    )
    .await;

    assert!(matches!(
        walk(&provider_for(&server)).await,
        Err(ProviderError::RouteNotFound(_))
    ));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error_without_the_token() {
    // Port 1 is reserved and closed on test machines
    let provider = MapboxDirections::new(MapboxConfig {
        access_token: Some("pk.test".to_string()),
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: Some(5),
    })
    .unwrap();

    let Err(ProviderError::Transport(message)) = walk(&provider).await else {
        panic!("expected Transport");
    };
    assert!(!message.contains("pk.test"), "{message}");
}

#[tokio::test]
async fn estimator_surfaces_upstream_failures_as_provider_errors() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(503)).await;

    let building = Building::new(
        "public-health",
        "Public Health Building",
        vec![Entrance::new("fifth-ave", "Fifth Ave main doors", public_health_door(), 1)],
    );
    let provider = provider_for(&server);
    let request = EstimateRequest::new(cathedral_lawn(), &building, 1);

    let err = estimate_eta(&request, Some(&provider)).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Provider(ProviderError::RouteNotFound(_))
    ));
}
