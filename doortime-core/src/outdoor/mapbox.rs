//! Mapbox Directions API client

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use super::{OutdoorDurationProvider, OutdoorParams, ProviderError, RoutingProfile};
use crate::{Coordinate, Seconds};

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Connection settings for [`MapboxDirections`]
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct MapboxConfig {
    pub access_token: Option<String>,
    pub base_url: String,
    /// Whole-request timeout; no timeout when unset
    pub timeout_secs: Option<u64>,
}

impl Default for MapboxConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl MapboxConfig {
    pub fn with_access_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..Self::default()
        }
    }
}

// Keeps the token out of logs
impl std::fmt::Debug for MapboxConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapboxConfig")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Outdoor durations from the Mapbox Directions API
#[derive(Debug, Clone)]
pub struct MapboxDirections {
    client: reqwest::Client,
    config: MapboxConfig,
}

impl MapboxDirections {
    /// Builds a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Unavailable`] if the HTTP client cannot be built.
    pub fn new(config: MapboxConfig) -> Result<Self, ProviderError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| {
            ProviderError::Unavailable(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self { client, config })
    }

    /// Uses an existing client, e.g. one shared with other services
    pub fn with_client(client: reqwest::Client, config: MapboxConfig) -> Self {
        Self { client, config }
    }

    fn access_token(&self) -> Result<&str, ProviderError> {
        self.config
            .access_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ProviderError::Unavailable("Mapbox access token is not configured".to_string())
            })
    }

    /// `{base}/directions/v5/mapbox/{profile}/{lng},{lat};{lng},{lat}`
    fn directions_url(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: RoutingProfile,
    ) -> String {
        format!(
            "{}/directions/v5/mapbox/{}/{},{};{},{}",
            self.config.base_url.trim_end_matches('/'),
            profile,
            origin.lng(),
            origin.lat(),
            destination.lng(),
            destination.lat()
        )
    }
}

#[async_trait]
impl OutdoorDurationProvider for MapboxDirections {
    async fn walking_duration(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        params: &OutdoorParams,
    ) -> Result<Seconds, ProviderError> {
        let token = self.access_token()?;
        let profile = params.profile();
        let url = self.directions_url(origin, destination, profile);

        debug!("Requesting {profile} directions from Mapbox");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("access_token", token),
                ("alternatives", "false"),
                ("overview", "false"),
            ])
            .send()
            .await
            // The URL carries the token
            .map_err(|e| ProviderError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.without_url().to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<DirectionsResponse>(&body)
                .ok()
                .and_then(|r| r.message)
                .unwrap_or_else(|| status.to_string());
            return Err(ProviderError::RouteNotFound(format!(
                "directions request failed with status {status}: {message}"
            )));
        }

        let duration = parse_route_duration(&body)?;
        debug!("Mapbox {profile} route takes {duration:.1}s");
        Ok(duration)
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    code: Option<String>,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    duration: Option<f64>,
}

/// Duration of the first route in a directions response body
fn parse_route_duration(body: &str) -> Result<Seconds, ProviderError> {
    let response: DirectionsResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::RouteNotFound(format!("unparseable directions response: {e}"))
    })?;

    if let Some(code) = response.code.as_deref() {
        if code != "Ok" {
            return Err(ProviderError::RouteNotFound(format!(
                "{code}: {}",
                response.message.as_deref().unwrap_or("no message")
            )));
        }
    }

    let route = response
        .routes
        .first()
        .ok_or_else(|| ProviderError::RouteNotFound("response contains no routes".to_string()))?;

    match route.duration {
        Some(duration) if duration.is_finite() && duration >= 0.0 => Ok(duration),
        Some(duration) => Err(ProviderError::RouteNotFound(format!(
            "route has invalid duration {duration}"
        ))),
        None => Err(ProviderError::RouteNotFound(
            "route has no duration".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn url_uses_lng_lat_pairs_and_profile() {
        let provider = MapboxDirections::new(MapboxConfig {
            base_url: "https://example.test/".to_string(),
            ..MapboxConfig::default()
        })
        .unwrap();

        let url = provider.directions_url(
            coord(40.4443, -79.9532),
            coord(40.44279, -79.9585),
            RoutingProfile::Walking,
        );
        assert_eq!(
            url,
            "https://example.test/directions/v5/mapbox/walking/-79.9532,40.4443;-79.9585,40.44279"
        );
    }

    #[test]
    fn parses_first_route_duration() {
        let body = r#"{"code":"Ok","routes":[{"duration":412.7,"distance":520.1},{"duration":900.0}]}"#;
        assert_eq!(parse_route_duration(body), Ok(412.7));
    }

    #[test]
    fn missing_duration_is_an_error_not_zero() {
        let body = r#"{"code":"Ok","routes":[{"distance":520.1}]}"#;
        assert!(matches!(
            parse_route_duration(body),
            Err(ProviderError::RouteNotFound(_))
        ));
    }

    #[test]
    fn non_ok_code_and_empty_routes_are_errors() {
        let no_route = r#"{"code":"NoRoute","message":"No route found","routes":[]}"#;
        let Err(ProviderError::RouteNotFound(message)) = parse_route_duration(no_route) else {
            panic!("expected RouteNotFound");
        };
        assert!(message.contains("NoRoute"));

        assert!(parse_route_duration(r#"{"routes":[]}"#).is_err());
        assert!(parse_route_duration("<html>").is_err());
        assert!(parse_route_duration(r#"{"routes":[{"duration":-3.0}]}"#).is_err());
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = MapboxConfig::with_access_token("pk.secret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("pk.secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[tokio::test]
    async fn missing_token_is_reported_as_configuration_error() {
        let provider = MapboxDirections::new(MapboxConfig {
            access_token: Some("   ".to_string()),
            ..MapboxConfig::default()
        })
        .unwrap();

        let err = provider
            .walking_duration(
                coord(40.4443, -79.9532),
                coord(40.44279, -79.9585),
                &OutdoorParams::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable(_)));
        assert!(matches!(Error::from(err), Error::Configuration(_)));
    }
}
