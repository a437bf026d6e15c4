pub mod announcer;
pub mod catalog;
pub mod config;
pub mod connector;
pub mod focus;

pub use announcer::TracingAnnouncer;
pub use catalog::{wallet_options, CatalogEntry, EnvProbe, InstallProbe, StaticProbe};
pub use config::{A11yConfig, ConfigError, CONFIG_PATH_ENV};
pub use connector::{connection_status, Connection, ConnectorError, SimulatedConnector};
pub use focus::InMemoryFocus;
