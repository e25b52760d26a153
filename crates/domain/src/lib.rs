//! DJDNS Domain Layer
pub mod alias;
pub mod config;
pub mod errors;
pub mod page;
pub mod record;

pub use alias::{scheme_name, AliasTable, ROOT_ALIAS};
pub use config::{CliOverrides, Config, ConfigError, SchemeConfig};
pub use errors::DomainError;
pub use page::{Branch, BranchAction, Page};
pub use record::{Record, RecordType, DEFAULT_RECORD_TTL};
