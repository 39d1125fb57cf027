/// Server configuration parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server listen port.
    pub port: u16,
    /// Server bind host.
    pub host: String,
    /// Maximum accepted request body size in bytes.
    pub body_limit: usize,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup, falling back to
    /// defaults for missing or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = AppConfig::default();
        AppConfig {
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            host: lookup("HOST").unwrap_or(defaults.host),
            body_limit: lookup("FEN_BODY_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.body_limit),
        }
    }

    /// Socket address string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Address a local client should dial to reach the server. Wildcard
    /// hosts map to the loopback address of the same family.
    pub fn probe_addr(&self) -> String {
        match self.host.as_str() {
            "" | "0.0.0.0" => format!("127.0.0.1:{}", self.port),
            "::" | "[::]" => format!("[::1]:{}", self.port),
            _ => self.bind_addr(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: 8082,
            host: "0.0.0.0".to_string(),
            body_limit: 16 * 1024,
        }
    }
}
