/**
* filename : config
* author : HAMA
* date: 2025. 6. 14.
* description:
**/

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::TickerError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub upstream: UpstreamConfig,
    pub monitor: MonitorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub trend_url: String,
    pub kline_url: String,
    pub user_agent: String,
    pub token: String,
    pub timeout_ms: Option<u64>,
    pub use_mock: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// 기본 시세 폴링 주기 (초)
    pub fetch_interval_secs: u64,
    /// KDJ 감시 주기 (초)
    pub kdj_interval_secs: u64,
    /// 소비측 드레인 주기 (초)
    pub drain_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
}

impl Config {
    /// Load configuration from a file
    pub fn load() -> Result<Self, TickerError> {
        // Try to load from config.json
        let config_path = Path::new("config.json");

        if config_path.exists() {
            let mut file = File::open(config_path)
                .map_err(|e| TickerError::ConfigError(format!("Failed to open config file: {}", e)))?;

            let mut contents = String::new();
            file.read_to_string(&mut contents)
                .map_err(|e| TickerError::ConfigError(format!("Failed to read config file: {}", e)))?;

            let mut cfg: Config = serde_json::from_str(&contents)
                .map_err(|e| TickerError::ConfigError(format!("Failed to parse config file: {}", e)))?;
            // environment overrides
            cfg.apply_env_overrides();
            Ok(cfg)
        } else {
            // Return default configuration
            let mut cfg = Config::default();
            cfg.apply_env_overrides();
            Ok(cfg)
        }
    }

    /// Apply environment variable overrides for runtime fields
    fn apply_env_overrides(&mut self) {
        use std::env;
        if let Ok(v) = env::var("TREND_URL") { if !v.is_empty() { self.upstream.trend_url = v; } }
        if let Ok(v) = env::var("KLINE_URL") { if !v.is_empty() { self.upstream.kline_url = v; } }
        if let Ok(v) = env::var("FETCH_INTERVAL_SECS") {
            if let Ok(n) = v.parse::<u64>() { if n > 0 { self.monitor.fetch_interval_secs = n; } }
        }
        if let Ok(v) = env::var("KDJ_INTERVAL_SECS") {
            if let Ok(n) = v.parse::<u64>() { if n > 0 { self.monitor.kdj_interval_secs = n; } }
        }
        if let Ok(v) = env::var("USE_MOCK") {
            let lower = v.to_lowercase();
            if ["1", "true", "yes"].contains(&lower.as_str()) { self.upstream.use_mock = true; }
            if ["0", "false", "no"].contains(&lower.as_str()) { self.upstream.use_mock = false; }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            upstream: UpstreamConfig {
                trend_url: "https://push2his.eastmoney.com/api/qt/stock/trends2/get".to_string(),
                kline_url: "https://push2his.eastmoney.com/api/qt/stock/kline/get".to_string(),
                user_agent: "Mozilla/5.0 (Windows NT; .NET)".to_string(),
                token: "fa5fd1943c7b386f172d6893dbfba10b".to_string(),
                timeout_ms: Some(5000),
                use_mock: false,
            },
            monitor: MonitorConfig {
                fetch_interval_secs: 5,
                kdj_interval_secs: 300,
                drain_interval_secs: 1,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
        }
    }
}
