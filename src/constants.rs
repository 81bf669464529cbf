use std::time::Duration;

/// User agent string for HTTP requests
pub const USER_AGENT: &str = "weather-app/1.0";

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// Media type requested from the NWS endpoints
pub const GEO_JSON: &str = "application/geo+json";

/// Timeout applied to every outbound request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of forecast periods included in a forecast report
pub const FORECAST_PERIOD_LIMIT: usize = 5;

/// Number of processes exposed by the processes://top resource
pub const TOP_PROCESS_LIMIT: usize = 10;
