use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;

use crate::construct::RoomKeeper;
use crate::error::{BookingError, Result};

pub const DEFAULT_FILE: &str = "roombook";
pub const ENV_PREFIX: &str = "ROOMBOOK";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub bind: String,
    pub port: u16,
    /// Tracing filter used when `RUST_LOG` is not set.
    pub log: String,
    /// Room names in catalog order; ids are assigned from 1.
    pub rooms: Vec<String>,
}

impl Settings {
    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(config::Config::builder()
            .set_default("bind", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("log", "info")?
            .set_default("rooms", vec!["Room A", "Room B", "Room C"])?)
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("rooms")
    }

    /// Defaults, then `path` (or `roombook.toml` when absent, optional), then `ROOMBOOK_*`.
    pub fn load(path: Option<&str>) -> Result<Settings> {
        let file = match path {
            Some(p) => File::with_name(p).required(true),
            None => File::with_name(DEFAULT_FILE).required(false),
        };
        let settings: Settings = Self::defaults()?
            .add_source(file)
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;
        settings.checked()
    }

    /// Defaults overlaid with a TOML document; the environment is not consulted.
    pub fn from_toml(toml: &str) -> Result<Settings> {
        let settings: Settings = Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        settings.checked()
    }

    fn checked(self) -> Result<Settings> {
        if self.rooms.is_empty() {
            return Err(BookingError::Config("at least one room must be configured".into()));
        }
        if self.rooms.iter().any(|name| name.trim().is_empty()) {
            return Err(BookingError::Config("room names must not be empty".into()));
        }
        Ok(self)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    pub fn room_keeper(&self) -> RoomKeeper {
        RoomKeeper::from_names(self.rooms.iter().cloned())
    }
}
