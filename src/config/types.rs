// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub templates: TemplatesConfig,
    /// Route table entries; kept as an ordered list so duplicate
    /// paths are representable and can be rejected at startup.
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Development toggle: logs route resolution per request
    pub debug: bool,
}

/// Templates configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TemplatesConfig {
    /// Directory holding the template files (`<id>.html`)
    pub dir: String,
}

/// A single route table entry: URL path bound to a template identifier
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    pub path: String,
    pub template: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, common, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// Routes registered when the config file provides none
pub(crate) fn default_routes() -> Vec<RouteSpec> {
    vec![
        RouteSpec {
            path: "/".to_string(),
            template: "index".to_string(),
        },
        RouteSpec {
            path: "/showcase".to_string(),
            template: "showcase".to_string(),
        },
    ]
}
