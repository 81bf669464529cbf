use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use crate::constants::{FORECAST_PERIOD_LIMIT, GEO_JSON, NWS_API_BASE};
use crate::fetch::Fetcher;
use crate::formatters::{format_alert, format_forecast_period};
use crate::models::{AlertResponse, ForecastResponse, PointsResponse};

/// Retrieval and orchestration against the National Weather Service API.
///
/// Each retriever fixes the request shape for one endpoint and forwards the
/// fetch outcome unchanged; the report methods apply the presence/emptiness
/// policy and produce the final text.
pub struct WeatherService {
    fetcher: Fetcher,
    base_url: String,
}

impl WeatherService {
    pub fn new() -> Result<Self> {
        Self::with_base_url(NWS_API_BASE)
    }

    /// Points the service at an alternate API base, used by tests to stand in
    /// a local server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new()?,
            base_url: base_url.into(),
        })
    }

    fn geo_json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GEO_JSON));
        headers
    }

    /// Active alerts for a two-letter state code.
    async fn active_alerts(&self, state: &str) -> Option<AlertResponse> {
        let url = format!("{}/alerts/active/area/{}", self.base_url, state);
        self.fetcher
            .fetch_json(&url, Self::geo_json_headers(), None)
            .await
    }

    /// Point metadata for a coordinate pair; carries the forecast URL used by
    /// the second stage.
    async fn point(&self, latitude: f64, longitude: f64) -> Option<PointsResponse> {
        let url = format!("{}/points/{},{}", self.base_url, latitude, longitude);
        self.fetcher
            .fetch_json(&url, Self::geo_json_headers(), None)
            .await
    }

    /// Forecast payload from a URL taken verbatim out of the point payload.
    async fn forecast(&self, forecast_url: &str) -> Option<ForecastResponse> {
        self.fetcher
            .fetch_json(forecast_url, Self::geo_json_headers(), None)
            .await
    }

    /// Builds the alerts report for a state.
    ///
    /// A failed fetch and a payload without a `features` key read the same to
    /// the caller; an empty feature list is reported separately.
    pub async fn alerts_report(&self, state: &str) -> String {
        let features = match self.active_alerts(state).await.and_then(|r| r.features) {
            Some(features) => features,
            None => return "Unable to fetch alerts or no alerts found.".to_string(),
        };

        if features.is_empty() {
            return "No active alerts for this state.".to_string();
        }

        features
            .iter()
            .map(format_alert)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Builds the forecast report for a coordinate pair: point lookup, then a
    /// forecast fetch at the URL the point payload names.
    ///
    /// A point payload missing its forecast URL fails to decode and is
    /// reported like any other failed point lookup.
    pub async fn forecast_report(&self, latitude: f64, longitude: f64) -> String {
        let points = match self.point(latitude, longitude).await {
            Some(points) => points,
            None => {
                return "Unable to fetch forecast data for the specified location.".to_string()
            }
        };

        let forecast = match self.forecast(&points.properties.forecast).await {
            Some(forecast) => forecast,
            None => return "Unable to fetch detailed forecast data.".to_string(),
        };

        forecast
            .properties
            .periods
            .iter()
            .take(FORECAST_PERIOD_LIMIT)
            .map(format_forecast_period)
            .collect::<Vec<_>>()
            .join("\n---\n")
    }
}
