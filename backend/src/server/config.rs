//! HTTP server settings and the configuration object built from them.

use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_READ_TIMEOUT_SECS: u64 = 10;
const DEFAULT_WRITE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 60;

/// Listener settings loaded via OrthoConfig from CLI flags, the
/// `USER_REGISTRY_*` environment, and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_REGISTRY")]
pub struct ServerSettings {
    /// IP address to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// Seconds allowed for a client to send request headers.
    pub read_timeout_secs: Option<u64>,
    /// Seconds allowed for a client to acknowledge connection shutdown.
    pub write_timeout_secs: Option<u64>,
    /// Seconds an idle keep-alive connection stays open.
    pub idle_timeout_secs: Option<u64>,
    /// Worker thread count; Actix picks one per core when unset.
    pub workers: Option<usize>,
    /// Insert the admin record at startup.
    pub seed_admin: Option<bool>,
}

impl ServerSettings {
    /// Return the configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Whether to seed the admin record, falling back to `true`.
    pub fn seed_admin(&self) -> bool {
        self.seed_admin.unwrap_or(true)
    }

    /// Client request timeout, falling back to 10 seconds.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs.unwrap_or(DEFAULT_READ_TIMEOUT_SECS))
    }

    /// Client disconnect timeout, falling back to 10 seconds.
    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(
            self.write_timeout_secs
                .unwrap_or(DEFAULT_WRITE_TIMEOUT_SECS),
        )
    }

    /// Keep-alive duration, falling back to 60 seconds.
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs.unwrap_or(DEFAULT_IDLE_TIMEOUT_SECS))
    }
}

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) client_request_timeout: Duration,
    pub(crate) client_disconnect_timeout: Duration,
    pub(crate) keep_alive: Duration,
    pub(crate) workers: Option<usize>,
}

impl ServerConfig {
    /// Construct a configuration for `bind_addr` with default timeouts.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            client_request_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
            client_disconnect_timeout: Duration::from_secs(DEFAULT_WRITE_TIMEOUT_SECS),
            keep_alive: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            workers: None,
        }
    }

    /// Resolve settings into a bindable configuration.
    ///
    /// # Errors
    /// Returns [`AddrParseError`] when the host is not an IP address.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, AddrParseError> {
        let ip: IpAddr = settings.host().parse()?;
        Ok(Self::new(SocketAddr::new(ip, settings.port()))
            .with_timeouts(
                settings.read_timeout(),
                settings.write_timeout(),
                settings.idle_timeout(),
            )
            .with_workers(settings.workers))
    }

    /// Override the read, write, and idle timeouts.
    #[must_use]
    pub fn with_timeouts(mut self, read: Duration, write: Duration, idle: Duration) -> Self {
        self.client_request_timeout = read;
        self.client_disconnect_timeout = write;
        self.keep_alive = idle;
        self
    }

    /// Pin the worker count; `None` keeps the Actix default.
    #[must_use]
    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
