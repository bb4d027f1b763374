//! TMAP open API client
//!
//! Provides keyword POI search and pedestrian routing using the
//! [TMAP](https://openapi.sk.com) REST API. Every call is a single request:
//! no retry, no cache.

use std::time::Duration;

use async_trait::async_trait;
use domain::entities::{PointOfInterest, RouteResponse};
use domain::value_objects::GeoLocation;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use tracing::{debug, instrument, warn};

use crate::config::TmapConfig;
use crate::error::TmapError;
use crate::models::{RawPoiResponse, RawRouteResponse, RouteRequest, poi_search_params};

/// Header carrying the application key (`appKey`, header names are case-insensitive)
const APP_KEY_HEADER: HeaderName = HeaderName::from_static("appkey");

/// Trait for TMAP clients
#[async_trait]
pub trait TmapClient: Send + Sync {
    /// Search points of interest by keyword around a center coordinate
    ///
    /// `page` starts at 1; each page holds at most
    /// [`POI_PAGE_SIZE`](crate::POI_PAGE_SIZE) results in provider order.
    async fn search_pois(
        &self,
        query: &str,
        center: &GeoLocation,
        page: u32,
    ) -> Result<Vec<PointOfInterest>, TmapError>;

    /// Request a route between two coordinates
    async fn fetch_route(&self, request: &RouteRequest) -> Result<RouteResponse, TmapError>;
}

/// TMAP client over HTTP
#[derive(Debug)]
pub struct HttpTmapClient {
    client: Client,
    config: TmapConfig,
}

impl HttpTmapClient {
    /// Create a new TMAP client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &TmapConfig) -> Result<Self, TmapError> {
        config.validate().map_err(TmapError::ConfigurationError)?;

        let mut app_key = HeaderValue::from_str(config.app_key.expose_secret())
            .map_err(|e| TmapError::ConfigurationError(format!("Invalid app key: {e}")))?;
        app_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(APP_KEY_HEADER, app_key);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("PathPal/1.0")
            .default_headers(headers)
            .build()
            .map_err(|e| TmapError::ConnectionFailed(e.to_string()))?;

        if !config.has_app_key() {
            warn!("TMAP app key is empty, requests will be rejected by the provider");
        }

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Log and map a transport error
    fn transport_error(&self, err: &reqwest::Error) -> TmapError {
        warn!(
            error = %err,
            timeout = err.is_timeout(),
            connect = err.is_connect(),
            status = ?err.status(),
            "TMAP request failed"
        );
        TmapError::from_transport(err, self.config.timeout_secs)
    }

    /// Parse the raw keyword search JSON into POIs
    fn parse_poi_response(body: &str) -> Result<Vec<PointOfInterest>, TmapError> {
        let raw: RawPoiResponse =
            serde_json::from_str(body).map_err(|e| TmapError::ParseError(e.to_string()))?;

        debug!(
            total = ?raw.search_poi_info.total_count,
            page_count = raw.search_poi_info.pois.poi.len(),
            "Parsed POI page"
        );

        Ok(raw
            .search_poi_info
            .pois
            .poi
            .into_iter()
            .map(|poi| poi.into_point_of_interest())
            .collect())
    }

    /// Parse the raw routing GeoJSON into a route
    fn parse_route_response(body: &str) -> Result<RouteResponse, TmapError> {
        let raw: RawRouteResponse =
            serde_json::from_str(body).map_err(|e| TmapError::ParseError(e.to_string()))?;
        raw.into_route()
    }
}

#[async_trait]
impl TmapClient for HttpTmapClient {
    #[instrument(skip(self, center), fields(center = %center))]
    async fn search_pois(
        &self,
        query: &str,
        center: &GeoLocation,
        page: u32,
    ) -> Result<Vec<PointOfInterest>, TmapError> {
        if query.trim().is_empty() {
            return Err(TmapError::InvalidRequest(
                "Search query must not be empty".to_string(),
            ));
        }
        if page == 0 {
            return Err(TmapError::InvalidRequest(
                "Page must be at least 1".to_string(),
            ));
        }

        let url = format!("{}/tmap/pois", self.config.base());
        let params = poi_search_params(query, center, page);

        debug!(?url, ?query, page, "Searching POIs");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            debug!("No POIs found");
            return Ok(Vec::new());
        }

        if !status.is_success() {
            warn!(status = status.as_u16(), "POI search rejected");
            return Err(TmapError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TmapError::ParseError(e.to_string()))?;

        let pois = Self::parse_poi_response(&body).inspect_err(|e| {
            warn!(error = %e, "Failed to decode POI search response");
        })?;

        debug!(count = pois.len(), "POIs found");
        Ok(pois)
    }

    #[instrument(skip(self, request), fields(from = %request.start, to = %request.end))]
    async fn fetch_route(&self, request: &RouteRequest) -> Result<RouteResponse, TmapError> {
        request.validate()?;

        let url = format!("{}{}", self.config.base(), request.mode.route_path());

        debug!(?url, "Requesting route");

        let response = self
            .client
            .post(&url)
            .query(&[("version", "1")])
            .json(&request.to_body())
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        debug!(status = status.as_u16(), "Route response received");

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Route request rejected");
            return Err(TmapError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TmapError::ParseError(e.to_string()))?;

        let route = Self::parse_route_response(&body).inspect_err(|e| {
            warn!(error = %e, "Failed to decode route response");
        })?;

        if route.features.is_empty() {
            warn!("Route response contained no features");
        }

        debug!(features = route.features.len(), "Route decoded");
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_poi_response() {
        let json = r#"{
            "searchPoiInfo": {
                "totalCount": "2",
                "count": "2",
                "page": "1",
                "pois": {
                    "poi": [
                        {
                            "id": "1129181",
                            "name": "서울역",
                            "noorLat": "37.55478641",
                            "noorLon": "126.97061345",
                            "upperAddrName": "서울",
                            "middleAddrName": "용산구",
                            "lowerAddrName": "동자동"
                        },
                        {
                            "id": "5628547",
                            "name": "서울역 버스환승센터",
                            "noorLat": "",
                            "noorLon": ""
                        }
                    ]
                }
            }
        }"#;

        let pois = HttpTmapClient::parse_poi_response(json).unwrap();
        assert_eq!(pois.len(), 2);
        assert_eq!(pois[0].id, "1129181");
        assert_eq!(pois[0].name, "서울역");
        assert_eq!(pois[0].address.as_deref(), Some("서울 용산구 동자동"));
        assert!((pois[0].location.unwrap().latitude() - 37.554_786).abs() < 1e-5);
        assert!(pois[1].location.is_none());
    }

    #[test]
    fn test_parse_route_response() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [126.97783, 37.56653] },
                    "properties": {
                        "totalDistance": 1598,
                        "totalTime": 1147,
                        "index": 0,
                        "pointIndex": 0,
                        "name": "",
                        "description": "세종대로 을 따라 101m 이동",
                        "turnType": 200,
                        "pointType": "SP"
                    }
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[126.97783, 37.56653], [126.97755, 37.56565]]
                    },
                    "properties": {
                        "index": 1,
                        "lineIndex": 0,
                        "name": "세종대로",
                        "description": "세종대로, 101m",
                        "distance": 101,
                        "time": 73,
                        "roadType": 21
                    }
                }
            ]
        }"#;

        let route = HttpTmapClient::parse_route_response(json).unwrap();
        assert_eq!(route.features.len(), 2);
        assert!(route.features[0].is_point());
        assert_eq!(route.features[0].properties.turn_type, Some(200));
        assert_eq!(route.features[0].properties.name, None);
        assert_eq!(route.features[1].properties.road_type, Some(21));
        assert_eq!(route.summary().unwrap().total_distance_m, 1598);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(HttpTmapClient::parse_route_response("not json").is_err());
        assert!(HttpTmapClient::parse_poi_response("{}").is_err());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = TmapConfig {
            timeout_secs: 0,
            ..TmapConfig::for_testing()
        };
        assert!(matches!(
            HttpTmapClient::new(&config),
            Err(TmapError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_new_rejects_unprintable_key() {
        let config = TmapConfig::with_app_key("bad\nkey");
        assert!(matches!(
            HttpTmapClient::new(&config),
            Err(TmapError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_new_accepts_empty_key() {
        assert!(HttpTmapClient::new(&TmapConfig::default()).is_ok());
    }
}
