//! MCP (Model Context Protocol) server.
//!
//! Exposes detection to AI assistants over stdio. Tools are thin wrappers
//! around `prose_probe_core`; no scoring logic lives here.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use prose_probe_core::markdown;

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `detect_ai_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DetectAiTextParams {
    /// The text to score.
    pub text: String,
    /// Whether to strip markdown formatting before scoring.
    #[serde(default)]
    pub strip_markdown: bool,
}

/// MCP server exposing detection to AI assistants.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    max_input_bytes: Option<usize>,
    strip_markdown: bool,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a server with the default input limit.
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
            max_input_bytes: Some(prose_probe_core::DEFAULT_MAX_INPUT_BYTES),
            strip_markdown: false,
        }
    }

    /// Reject `text` arguments larger than `max_bytes` (`None` disables the check).
    pub const fn with_input_limit(mut self, max_bytes: Option<usize>) -> Self {
        self.max_input_bytes = max_bytes;
        self
    }

    /// Strip markdown from every request, regardless of the tool argument.
    pub const fn with_strip_markdown(mut self, strip: bool) -> Self {
        self.strip_markdown = strip;
        self
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let text = if params.format == "json" {
            let info = serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "description": env!("CARGO_PKG_DESCRIPTION"),
            });
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Score text for likely machine generation.
    #[tool(
        description = "Estimate how likely a text is to be AI-generated. Returns ai_probability, human_probability, five metrics (burstiness, perplexity, diversity, repetition, start_diversity) and analysis lines, or {\"error\": ...} when the text is too short."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn detect_ai_text(
        &self,
        Parameters(params): Parameters<DetectAiTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "detect_ai_text",
            strip_md = params.strip_markdown,
            "executing MCP tool"
        );

        if let Some(max) = self.max_input_bytes
            && params.text.len() > max
        {
            return Err(McpError::invalid_params(
                format!(
                    "input too large: {} bytes (limit: {max} bytes)",
                    params.text.len()
                ),
                None,
            ));
        }

        let detection = if params.strip_markdown || self.strip_markdown {
            prose_probe_core::detect(&markdown::strip_to_prose(&params.text))
        } else {
            prose_probe_core::detect(&params.text)
        };

        let json = serde_json::to_string_pretty(&detection)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "detect_ai_text",
            ai_probability = ?detection.report().map(|r| r.ai_probability),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Call detect_ai_text to score prose for likely machine generation.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    const UNIFORM: &str = "The cat sat. The dog ran. The bird flew. The fish swam.";

    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn detect_json(server: &ProjectServer, text: &str, strip: bool) -> serde_json::Value {
        let params = Parameters(DetectAiTextParams {
            text: text.to_string(),
            strip_markdown: strip,
        });
        let result = server
            .detect_ai_text(params)
            .expect("detect_ai_text should succeed");
        assert!(!result.is_error.unwrap_or(false));
        serde_json::from_str(extract_text(&result).expect("text content")).expect("valid JSON")
    }

    #[test]
    fn server_info_has_name_and_tools() {
        let server = ProjectServer::new();
        let info = ServerHandler::get_info(&server);
        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
        assert!(
            info.instructions
                .expect("server should have instructions")
                .contains("detect_ai_text")
        );
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let server = ProjectServer::new();
        let result = server
            .get_info(Parameters(GetInfoParams {
                format: "json".to_string(),
            }))
            .expect("get_info should succeed");
        let json: serde_json::Value =
            serde_json::from_str(extract_text(&result).expect("text content")).unwrap();
        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    }

    #[test]
    fn get_info_tool_returns_text_by_default() {
        let server = ProjectServer::new();
        let result = server
            .get_info(Parameters(GetInfoParams {
                format: default_format(),
            }))
            .expect("get_info should succeed");
        let text = extract_text(&result).expect("text content");
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn detect_tool_returns_report() {
        let json = detect_json(&ProjectServer::new(), UNIFORM, false);
        assert_eq!(json["ai_probability"], 60.0);
        assert_eq!(json["human_probability"], 40.0);
        assert_eq!(json["metrics"]["start_diversity"], 0.25);
    }

    #[test]
    fn detect_tool_returns_error_object_for_short_text() {
        let json = detect_json(&ProjectServer::new(), "hi there", false);
        assert_eq!(json, serde_json::json!({"error": "Text too short for analysis"}));
    }

    #[test]
    fn detect_tool_strips_markdown() {
        let text = format!("# Heading\n\n{UNIFORM}\n\n```\nfn main() {{}}\n```");
        let json = detect_json(&ProjectServer::new(), &text, true);
        assert_eq!(json["ai_probability"], 60.0);
    }

    #[test]
    fn detect_tool_enforces_input_limit() {
        let server = ProjectServer::new().with_input_limit(Some(10));
        let err = server
            .detect_ai_text(Parameters(DetectAiTextParams {
                text: UNIFORM.to_string(),
                strip_markdown: false,
            }))
            .unwrap_err();
        assert!(err.message.contains("input too large"));
    }
}
