pub mod configs;
pub mod defaults;
pub mod envconfig;
pub mod validate;

pub use configs::{
    AppConfig, AuthConfig, BookingConfig, DatabaseConfig, GeneralConfig, LoggingConfig,
};
pub use envconfig::EnvConfig;
