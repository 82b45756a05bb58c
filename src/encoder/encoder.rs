use crate::error::Result;
use crate::model::Record;

pub trait Encoder {
    fn encode(&self, record: &Record) -> Result<Vec<u8>>;
}

/// Function-pointer form of an encoder, used by the content-type dispatch table.
pub type EncodeFn = fn(&Record) -> Result<Vec<u8>>;
