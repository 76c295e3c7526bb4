//! relay-dns domain layer: wire codec, configuration and errors.
pub mod config;
pub mod errors;
pub mod upstream_addr;
pub mod wire;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use upstream_addr::UpstreamAddr;
pub use wire::{Answer, Flags, Header, Message, Name, Question, RecordType, ResponseCode, Sections};
