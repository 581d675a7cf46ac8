pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LocalStorage, TomlConfig};

pub use crate::core::escape::{escape_field, CsvEscaper, NullPolicy};
pub use crate::core::mapper::RowMapper;
pub use crate::core::profile::{Column, ColumnValue, Profile, TimestampFormat};
pub use crate::core::slug::slugify;
pub use crate::core::{etl::EtlEngine, pipeline::PropertyPipeline};
pub use domain::ports::{ConfigProvider, Pipeline, Storage};
pub use domain::model::{EtlReport, FieldValue, LineEnding, PropertyRecord};
pub use utils::error::{EtlError, Result};
