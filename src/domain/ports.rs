use crate::domain::model::{LineEnding, PropertyRecord, TransformResult};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn delimiter(&self) -> char;
    fn line_ending(&self) -> LineEnding;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<PropertyRecord>>;
    fn transform(&self, data: Vec<PropertyRecord>) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<String>;
}
