use std::env;

const DEFAULT_IP: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// HTTP listener of the expense tracker API
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl ServerConfig {
    /// Environment variables:
    /// - SERVICE_IP: address to bind (default: "127.0.0.1"; "0.0.0.0" inside containers)
    /// - SERVICE_PORT: port to bind (default: 8080)
    pub fn from_env() -> Self {
        Self::from_vars(env::var("SERVICE_IP").ok(), env::var("SERVICE_PORT").ok())
    }

    fn from_vars(ip: Option<String>, port: Option<String>) -> Self {
        let ip = ip
            .map(|ip| ip.trim().to_string())
            .filter(|ip| !ip.is_empty())
            .unwrap_or_else(|| DEFAULT_IP.to_string());

        let port = match port {
            None => DEFAULT_PORT,
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|port| *port > 0)
                .unwrap_or_else(|| {
                    tracing::warn!(value = %raw, "Invalid SERVICE_PORT; using {}", DEFAULT_PORT);
                    DEFAULT_PORT
                }),
        };

        Self { ip, port }
    }

    /// Bind address as "ip:port"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}
