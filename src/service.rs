use anyhow::Result;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{
        AnnotateAble, CallToolResult, Content, Implementation, ListResourcesResult,
        PaginatedRequestParam, ProtocolVersion, RawResource, ReadResourceRequestParam,
        ReadResourceResult, ResourceContents, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router,
    ErrorData as McpError, RoleServer,
};
use std::sync::Arc;

use crate::constants::TOP_PROCESS_LIMIT;
use crate::models::{GetAlertsRequest, GetForecastRequest, RunShellCommandRequest};
use crate::system;
use crate::weather::WeatherService;

/// URI of the process snapshot resource
const TOP_PROCESSES_URI: &str = "processes://top";

/// MCP service exposing the weather tools, the shell tool, and the process
/// snapshot resource.
#[derive(Clone)]
pub struct WeatherServer {
    weather: Arc<WeatherService>,
    tool_router: ToolRouter<Self>,
}

impl WeatherServer {
    pub fn new() -> Result<Self> {
        Ok(Self::with_weather(WeatherService::new()?))
    }

    /// Builds the server around an explicitly constructed weather service,
    /// letting tests inject one pointed at a local API.
    pub fn with_weather(weather: WeatherService) -> Self {
        Self {
            weather: Arc::new(weather),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for WeatherServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "weather-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Weather alerts and forecasts from the National Weather Service, \
                plus shell access and a ranked process listing for the local machine."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let mut resource = RawResource::new(TOP_PROCESSES_URI, "Top processes");
        resource.description =
            Some("The top 10 processes on this machine ranked by CPU usage".to_string());

        Ok(ListResourcesResult {
            resources: vec![resource.no_annotation()],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        match request.uri.as_str() {
            TOP_PROCESSES_URI => {
                // The snapshot sleeps for a CPU sampling interval, so it runs
                // off the async runtime. A panicked snapshot becomes the
                // single error line, never an MCP error.
                let lines = tokio::task::spawn_blocking(|| system::top_processes(TOP_PROCESS_LIMIT))
                    .await
                    .unwrap_or_else(|e| vec![format!("Error getting process information: {}", e)]);

                Ok(ReadResourceResult {
                    contents: lines
                        .into_iter()
                        .map(|line| ResourceContents::text(line, TOP_PROCESSES_URI))
                        .collect(),
                })
            }
            other => Err(McpError::resource_not_found(
                format!("Unknown resource: {}", other),
                None,
            )),
        }
    }
}

#[tool_router]
impl WeatherServer {
    /// Gets active weather alerts for a US state
    #[tool(description = "Get active weather alerts for a US state. Provide a two-letter state code (e.g., 'CA' for California, 'NY' for New York).")]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting alerts for state: {}", request.state);

        let report = self.weather.alerts_report(&request.state).await;

        Ok(CallToolResult::success(vec![Content::text(report)]))
    }

    /// Gets the NWS forecast for a coordinate pair
    #[tool(description = "Get the weather forecast for a US location. Provide latitude and longitude (e.g., latitude: 40.7128, longitude: -74.0060 for New York).")]
    async fn get_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting forecast for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let report = self
            .weather
            .forecast_report(request.latitude, request.longitude)
            .await;

        Ok(CallToolResult::success(vec![Content::text(report)]))
    }

    /// Runs a shell command and returns its output
    #[tool(description = "Run a shell command on the local machine and return its output. On failure the output is the captured stderr prefixed with 'Error: '.")]
    async fn run_shell_command(
        &self,
        Parameters(request): Parameters<RunShellCommandRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Running shell command");

        let outcome = system::run_shell_command(&request.command).await;

        Ok(CallToolResult::success(vec![Content::text(
            outcome.into_text(),
        )]))
    }
}
