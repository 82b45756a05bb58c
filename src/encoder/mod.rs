mod content_type;
mod encoder;
mod form;
mod json;
mod multipart;
mod xml;

pub use content_type::*;
pub use encoder::{EncodeFn, Encoder};
pub use form::{encode_url_form, to_form_values, FormValues, UrlFormEncoder};
pub use json::{encode_json, JsonEncoder};
pub use multipart::{encode_multipart, MultipartEncoder, MultipartWriter};
pub use xml::{encode_xml, XmlEncoder, XML_HEADER};
