use std::sync::Mutex;

use async_trait::async_trait;
use doortime_core::prelude::*;
use doortime_core::{ProviderError, ResolvedVerticalMode};

/// Records what it was asked and answers with a fixed result
struct RecordingProvider {
    answer: Result<Seconds, ProviderError>,
    calls: Mutex<Vec<(Coordinate, Coordinate, RoutingProfile)>>,
}

impl RecordingProvider {
    fn answering(answer: Result<Seconds, ProviderError>) -> Self {
        Self {
            answer,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(Coordinate, Coordinate, RoutingProfile)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OutdoorDurationProvider for RecordingProvider {
    async fn walking_duration(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        params: &OutdoorParams,
    ) -> Result<Seconds, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((origin, destination, params.profile()));
        self.answer.clone()
    }
}

fn coord(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).unwrap()
}

fn origin() -> Coordinate {
    coord(40.4443, -79.9532)
}

fn building_at_origin() -> Building {
    Building::new(
        "benedum",
        "Benedum Hall",
        vec![Entrance::new("main", "Main doors", origin(), 1)],
    )
}

fn public_health() -> Building {
    Building::new(
        "public-health",
        "Public Health Building",
        vec![
            Entrance::new("fifth-ave", "Fifth Ave main doors", coord(40.44279, -79.9585), 1),
            Entrance::new("de-soto", "De Soto St doors", coord(40.44273, -79.95795), 3),
        ],
    )
}

#[tokio::test]
async fn missing_provider_and_zero_precomputed_is_a_configuration_error() {
    let building = building_at_origin();
    let request =
        EstimateRequest::new(origin(), &building, 1).with_precomputed_outdoor_duration(0.0);

    let err = estimate_eta(&request, None).await.unwrap_err();
    assert!(matches!(err, Error::Configuration(_)), "got {err:?}");
}

#[tokio::test]
async fn same_floor_estimate_adds_all_components() {
    let building = building_at_origin();
    let request = EstimateRequest::new(origin(), &building, 1)
        .with_precomputed_outdoor_duration(120.0)
        .with_horizontal_legs(35.0, 35.0)
        .with_indoor(IndoorParams {
            indoor_walk_speed_mps: Some(1.1),
            ..IndoorParams::default()
        });

    let result = estimate_eta(&request, None).await.unwrap();

    let expected = 120.0 + 12.0 + 70.0 / 1.1 + 0.0 + 8.0;
    assert!((result.total_seconds - expected).abs() < 1e-9);
    assert!((result.total_seconds - 203.6).abs() < 0.05);
    assert_eq!(result.total_minutes, 4);
    assert_eq!(result.breakdown.vertical_sec, 0.0);
    assert_eq!(result.breakdown.indoor_transition_sec, 12.0);
    assert_eq!(result.breakdown.wayfinding_sec, 8.0);
    assert_eq!(result.floors_to_climb, 0);
    assert_eq!(result.entrance.id, "main");
    assert!((result.breakdown.total() - result.total_seconds).abs() < 1e-9);
}

#[tokio::test]
async fn provider_is_asked_for_origin_to_selected_entrance() {
    let building = public_health();
    let provider = RecordingProvider::answering(Ok(300.0));
    // Closer to the De Soto doors
    let start = coord(40.4427, -79.9570);
    let request = EstimateRequest::new(start, &building, 3).with_outdoor(OutdoorParams {
        profile: Some(RoutingProfile::Walking),
    });

    let result = estimate_eta(&request, Some(&provider)).await.unwrap();

    assert_eq!(result.entrance.id, "de-soto");
    assert_eq!(result.breakdown.outdoor_sec, 300.0);
    assert_eq!(
        provider.calls(),
        vec![(start, building.entrances[1].location, RoutingProfile::Walking)]
    );
    // Entrance opens on floor 3, so nothing to climb
    assert_eq!(result.floors_to_climb, 0);
    assert_eq!(result.breakdown.vertical_sec, 0.0);
}

#[tokio::test]
async fn preferred_entrance_changes_vertical_leg() {
    let building = public_health();
    let provider = RecordingProvider::answering(Ok(300.0));
    let request = EstimateRequest::new(coord(40.4427, -79.9570), &building, 6)
        .with_preferred_entrance("fifth-ave")
        .with_indoor(IndoorParams {
            vertical_mode: Some(VerticalMode::Auto),
            ..IndoorParams::default()
        });

    let result = estimate_eta(&request, Some(&provider)).await.unwrap();

    assert_eq!(result.entrance.id, "fifth-ave");
    assert_eq!(result.floors_to_climb, 5);
    assert_eq!(result.vertical_mode, ResolvedVerticalMode::Elevator);
    assert_eq!(result.breakdown.vertical_sec, 50.5);
}

#[tokio::test]
async fn stairs_use_building_floor_height() {
    let mut building = building_at_origin();
    building.floor_height_meters = Some(3.8);
    let request =
        EstimateRequest::new(origin(), &building, 6).with_precomputed_outdoor_duration(60.0);

    let result = estimate_eta(&request, None).await.unwrap();

    assert_eq!(result.vertical_mode, ResolvedVerticalMode::Stairs);
    assert!((result.breakdown.vertical_sec - 5.0 * 3.8 / 0.30).abs() < 1e-9);
}

#[tokio::test]
async fn provider_failure_aborts_the_estimate() {
    let building = building_at_origin();

    let no_route =
        RecordingProvider::answering(Err(ProviderError::RouteNotFound("NoRoute".to_string())));
    let err = estimate_eta(&EstimateRequest::new(origin(), &building, 2), Some(&no_route))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Provider(ProviderError::RouteNotFound(_))));

    let no_token =
        RecordingProvider::answering(Err(ProviderError::Unavailable("no token".to_string())));
    let err = estimate_eta(&EstimateRequest::new(origin(), &building, 2), Some(&no_token))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[tokio::test]
async fn empty_building_is_rejected_before_the_provider_is_called() {
    let building = Building::new("ghost", "No doors", Vec::new());
    let provider = RecordingProvider::answering(Ok(10.0));

    let err = estimate_eta(&EstimateRequest::new(origin(), &building, 1), Some(&provider))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidBuildingData(_)));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn straight_line_provider_works_offline() {
    let building = public_health();
    let provider = StraightLineWalking::default();
    let start = coord(40.4443, -79.9532);
    let request = EstimateRequest::new(start, &building, 2);

    let result = estimate_eta(&request, Some(&provider)).await.unwrap();

    let expected = provider.duration_between(&start, &result.entrance.location);
    assert!((result.breakdown.outdoor_sec - expected).abs() < 1e-9);
    assert!(result.breakdown.outdoor_sec > 0.0);
}

#[tokio::test]
async fn concurrent_estimates_are_independent() {
    let building = public_health();
    let provider = RecordingProvider::answering(Ok(90.0));

    let low = EstimateRequest::new(origin(), &building, 1).with_preferred_entrance("fifth-ave");
    let high = EstimateRequest::new(origin(), &building, 9)
        .with_preferred_entrance("fifth-ave")
        .with_indoor(IndoorParams {
            vertical_mode: Some(VerticalMode::Elevator),
            ..IndoorParams::default()
        });

    let (low, high) = tokio::join!(
        estimate_eta(&low, Some(&provider)),
        estimate_eta(&high, Some(&provider))
    );
    let (low, high) = (low.unwrap(), high.unwrap());

    assert_eq!(low.breakdown.vertical_sec, 0.0);
    assert_eq!(high.breakdown.vertical_sec, 30.0 + 8.0 * 2.5 + 8.0);
    assert_eq!(provider.calls().len(), 2);
}
