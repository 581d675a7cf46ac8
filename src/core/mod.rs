pub mod escape;
pub mod etl;
pub mod json_text;
pub mod mapper;
pub mod pipeline;
pub mod profile;
pub mod slug;

pub use crate::domain::model::{FieldValue, PropertyRecord, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
