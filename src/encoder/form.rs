use std::collections::BTreeMap;

use tracing::debug;

use super::encoder::Encoder;
use crate::error::{Error, ErrorKind, Result};
use crate::model::Record;

/// Form field name to its values, ordered by name. Shared by the
/// URL-encoded and multipart encoders.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, Vec<String>>);

impl FormValues {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Appends `value` to the values of `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Replaces all values of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), vec![value.into()]);
    }

    /// First value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `application/x-www-form-urlencoded` form of the values, sorted by key
    /// and then by value.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.0 {
            let mut values: Vec<&String> = values.iter().collect();
            values.sort();
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

/// Reflects the record into form values, one single-value entry per field.
pub fn to_form_values(record: &Record) -> Result<FormValues> {
    let mut values = FormValues::new();
    for (name, value) in record.fields() {
        if values.contains_key(name) {
            return Err(Error::from(format!("duplicate form field '{}'", name))
                .with_kind(ErrorKind::Encoding));
        }
        values.set(name, value);
    }
    Ok(values)
}

pub fn encode_url_form(record: &Record) -> Result<Vec<u8>> {
    let buf = to_form_values(record)?.encode().into_bytes();
    debug!("encoded record as URL-encoded form, {} bytes", buf.len());
    Ok(buf)
}

pub struct UrlFormEncoder {}

impl UrlFormEncoder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Encoder for UrlFormEncoder {
    fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        encode_url_form(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FIELD_NAMES;

    #[test]
    fn test_to_form_values() -> Result<()> {
        let record = Record::new("000", "Bla Bla Bla", "1234567890", "foo-bar-baz", "today");
        let values = to_form_values(&record)?;

        assert_eq!(FIELD_NAMES.len(), values.len());
        for (name, value) in record.fields() {
            assert_eq!(&[value.to_string()], values.get_all(name), "field {}", name);
        }
        Ok(())
    }

    #[test]
    fn test_encode_url_form() -> Result<()> {
        let record = Record::new(
            "000",
            "Bla Bla Bla",
            "1234567890",
            "foo-bar-baz",
            "2024-01-01 00:00:00 Z00:00",
        );

        assert_eq!(
            "error_codes=000&identifier=foo-bar-baz&phone_number=1234567890\
             &provider=Bla+Bla+Bla&reporting_date=2024-01-01+00%3A00%3A00+Z00%3A00",
            String::from_utf8_lossy(&UrlFormEncoder::new().encode(&record)?)
        );
        Ok(())
    }

    #[test]
    fn test_form_values_multi() {
        let mut values = FormValues::new();
        assert!(values.is_empty());

        values.add("b", "2");
        values.add("a", "x y");
        values.add("b", "1");
        assert_eq!(Some("2"), values.get("b"));
        assert_eq!(&["2".to_string(), "1".to_string()], values.get_all("b"));
        assert_eq!(vec!["a", "b"], values.keys().collect::<Vec<_>>());
        assert_eq!("a=x+y&b=1&b=2", values.encode());

        values.set("b", "&=");
        assert_eq!("a=x+y&b=%26%3D", values.encode());
        assert_eq!(None, values.get("c"));
        assert!(values.get_all("c").is_empty());
    }
}
