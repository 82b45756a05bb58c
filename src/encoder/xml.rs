use tracing::debug;

use super::encoder::Encoder;
use crate::error::{Error, Result};
use crate::model::Record;

/// XML declaration, without the trailing newline.
pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

pub fn encode_xml(record: &Record, with_header: bool) -> Result<Vec<u8>> {
    let sanitized = xml_safe(record);
    let body = instant_xml::to_string(sanitized.as_ref().unwrap_or(record))
        .map_err(|e| Error::encoding("XML serialization failed", e))?;

    let mut buf = Vec::with_capacity(XML_HEADER.len() + body.len());
    if with_header {
        buf.extend_from_slice(XML_HEADER.as_bytes());
    }
    buf.extend_from_slice(body.as_bytes());

    debug!(with_header, "encoded record as XML, {} bytes", buf.len());
    Ok(buf)
}

// XML 1.0 Char production.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

fn replace_non_xml_chars(s: &str) -> String {
    s.chars()
        .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
        .collect()
}

/// Copy of the record with characters outside the XML character range
/// replaced by U+FFFD, or `None` when every value is already valid.
fn xml_safe(record: &Record) -> Option<Record> {
    if record.fields().all(|(_, value)| value.chars().all(is_xml_char)) {
        return None;
    }

    Some(Record::new(
        replace_non_xml_chars(record.error_codes()),
        replace_non_xml_chars(record.provider()),
        replace_non_xml_chars(record.phone_number()),
        replace_non_xml_chars(record.identifier()),
        replace_non_xml_chars(record.reporting_date()),
    ))
}

pub struct XmlEncoder {
    with_header: bool,
}

impl XmlEncoder {
    pub fn new(with_header: bool) -> Self {
        Self { with_header }
    }
}

impl Encoder for XmlEncoder {
    fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        encode_xml(record, self.with_header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record::new("000", "Bla Bla Bla", "1234567890", "foo-bar-baz", "2024-01-01")
    }

    #[test]
    fn test_header_is_only_difference() -> Result<()> {
        let with = encode_xml(&record(), true)?;
        let without = encode_xml(&record(), false)?;

        assert!(with.starts_with(XML_HEADER.as_bytes()));
        assert!(!without.starts_with(b"<?xml"));
        assert_eq!(&with[XML_HEADER.len()..], &without[..]);
        Ok(())
    }

    #[test]
    fn test_elements_use_field_names() -> Result<()> {
        let xml = String::from_utf8(XmlEncoder::new(false).encode(&record())?)
            .map_err(|e| ("XML is not UTF-8", e))?;

        assert!(xml.starts_with("<Record>"), "{}", xml);
        assert!(xml.ends_with("</Record>"), "{}", xml);

        let mut pos = 0;
        for (name, value) in record().fields() {
            let element = format!("<{name}>{value}</{name}>", name = name, value = value);
            let found = xml[pos..]
                .find(&element)
                .unwrap_or_else(|| panic!("missing or out of order {} in {}", element, xml));
            pos += found + element.len();
        }
        Ok(())
    }

    #[test]
    fn test_illegal_chars_are_replaced() -> Result<()> {
        let record = Record::new("\u{1}", "", "a\u{1F}b", "\u{FFFE}", "tab\there\r\n");
        let xml = String::from_utf8_lossy(&encode_xml(&record, false)?).into_owned();

        assert!(xml.contains("<error_codes>\u{FFFD}</error_codes>"), "{}", xml);
        assert!(xml.contains("<phone_number>a\u{FFFD}b</phone_number>"), "{}", xml);
        assert!(xml.contains("<identifier>\u{FFFD}</identifier>"), "{}", xml);
        assert!(!xml.contains('\u{1}'), "{}", xml);
        assert!(!xml.contains('\u{FFFE}'), "{}", xml);
        assert!(xml.contains("tab\there"), "{}", xml);
        Ok(())
    }

    #[test]
    fn test_valid_record_is_not_copied() {
        assert!(xml_safe(&record()).is_none());
        assert!(xml_safe(&Record::new("\u{10FFFF}", "\u{E000}", "\t", "", "")).is_none());
        assert!(xml_safe(&Record::new("", "", "", "", "\u{0}")).is_some());
    }

    #[test]
    fn test_text_is_escaped() -> Result<()> {
        let record = Record::new("<1>", "A & B", "", "", "");
        let xml = String::from_utf8_lossy(&encode_xml(&record, false)?).into_owned();

        assert!(xml.contains("A &amp; B"), "{}", xml);
        assert!(!xml.contains("<1>"), "{}", xml);
        Ok(())
    }
}
