use tracing::debug;

use super::encoder::Encoder;
use crate::error::{Error, Result};
use crate::model::Record;

pub fn encode_json(record: &Record) -> Result<Vec<u8>> {
    let buf =
        serde_json::to_vec(record).map_err(|e| Error::encoding("JSON serialization failed", e))?;
    debug!("encoded record as JSON, {} bytes", buf.len());
    Ok(buf)
}

pub struct JsonEncoder {}

impl JsonEncoder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        encode_json(record)
    }
}
