use std::io::{self, Write};

use tracing::debug;
use uuid::Uuid;

use super::encoder::Encoder;
use super::form::to_form_values;
use crate::error::{Error, Result};
use crate::model::Record;

const MAX_BOUNDARY_LEN: usize = 70;

// RFC 2046 bchars, besides ASCII alphanumerics.
const BOUNDARY_SPECIALS: &str = "'()+_,-./:=? ";

// Characters forcing the boundary parameter to be quoted.
const TSPECIALS: &str = "()<>@,;:\\\"/[]?= ";

/// Writes a `multipart/form-data` body into `W`.
pub struct MultipartWriter<W> {
    inner: W,
    boundary: String,
    parts: usize,
}

impl<W: Write> MultipartWriter<W> {
    /// Creates a writer with a fresh random boundary.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            boundary: random_boundary(),
            parts: 0,
        }
    }

    pub fn with_boundary(inner: W, boundary: &str) -> Result<Self> {
        validate_boundary(boundary)?;
        Ok(Self {
            inner,
            boundary: boundary.to_string(),
            parts: 0,
        })
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value of the `Content-Type` header matching the body being written.
    pub fn form_data_content_type(&self) -> String {
        if self.boundary.chars().any(|c| TSPECIALS.contains(c)) {
            format!("multipart/form-data; boundary=\"{}\"", self.boundary)
        } else {
            format!("multipart/form-data; boundary={}", self.boundary)
        }
    }

    pub fn write_field(&mut self, name: &str, value: &str) -> io::Result<()> {
        if self.parts > 0 {
            write!(self.inner, "\r\n--{}\r\n", self.boundary)?;
        } else {
            write!(self.inner, "--{}\r\n", self.boundary)?;
        }
        write!(
            self.inner,
            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
            escape_quotes(name)
        )?;
        self.inner.write_all(value.as_bytes())?;

        self.parts += 1;
        Ok(())
    }

    /// Writes the closing delimiter and hands back the sink.
    pub fn close(mut self) -> io::Result<W> {
        if self.parts > 0 {
            write!(self.inner, "\r\n--{}--\r\n", self.boundary)?;
        } else {
            write!(self.inner, "--{}--\r\n", self.boundary)?;
        }
        Ok(self.inner)
    }
}

fn random_boundary() -> String {
    Uuid::new_v4().simple().to_string()
}

fn validate_boundary(boundary: &str) -> Result<()> {
    if boundary.is_empty() || boundary.len() > MAX_BOUNDARY_LEN {
        return Err(format!(
            "multipart boundary must be 1 to {} characters long",
            MAX_BOUNDARY_LEN
        )
        .into());
    }
    if boundary.ends_with(' ') {
        return Err("multipart boundary must not end with a space".into());
    }
    match boundary
        .chars()
        .find(|&c| !c.is_ascii_alphanumeric() && !BOUNDARY_SPECIALS.contains(c))
    {
        Some(c) => Err(format!("invalid character '{}' in multipart boundary", c).into()),
        None => Ok(()),
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Encodes the record as `multipart/form-data`. Every call picks a new
/// boundary, so the output is only comparable after parsing.
pub fn encode_multipart(record: &Record) -> Result<Vec<u8>> {
    let values = to_form_values(record)?;

    let mut writer = MultipartWriter::new(Vec::new());
    for (name, field_values) in values.iter() {
        if field_values.is_empty() {
            writer
                .write_field(name, "")
                .map_err(|e| Error::encoding("multipart write failed", e))?;
            continue;
        }
        for value in field_values {
            writer
                .write_field(name, value)
                .map_err(|e| Error::encoding("multipart write failed", e))?;
        }
    }

    let boundary = writer.boundary().to_string();
    let buf = writer
        .close()
        .map_err(|e| Error::encoding("multipart write failed", e))?;

    debug!(%boundary, "encoded record as multipart form, {} bytes", buf.len());
    Ok(buf)
}

pub struct MultipartEncoder {}

impl MultipartEncoder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Encoder for MultipartEncoder {
    fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        encode_multipart(record)
    }
}
