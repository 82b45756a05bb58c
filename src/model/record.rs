use instant_xml::ToXml;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Wire names of the record fields, in declaration order. Every format
/// encodes the record under exactly these names.
pub const FIELD_NAMES: [&str; 5] = [
    "error_codes",
    "provider",
    "phone_number",
    "identifier",
    "reporting_date",
];

/// The report being encoded. Immutable once constructed.
///
/// The XML element names come from the field identifiers below, so they must
/// stay in sync with `FIELD_NAMES`.
#[derive(Debug, Clone, PartialEq, Eq, ToXml)]
pub struct Record {
    error_codes: String,
    provider: String,
    phone_number: String,
    identifier: String,
    reporting_date: String,
}

impl Record {
    pub fn new(
        error_codes: impl Into<String>,
        provider: impl Into<String>,
        phone_number: impl Into<String>,
        identifier: impl Into<String>,
        reporting_date: impl Into<String>,
    ) -> Self {
        Self {
            error_codes: error_codes.into(),
            provider: provider.into(),
            phone_number: phone_number.into(),
            identifier: identifier.into(),
            reporting_date: reporting_date.into(),
        }
    }

    #[inline]
    pub fn error_codes(&self) -> &str {
        &self.error_codes
    }

    #[inline]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    #[inline]
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Already formatted by the caller, see `common::time`.
    #[inline]
    pub fn reporting_date(&self) -> &str {
        &self.reporting_date
    }

    /// (name, value) pairs in `FIELD_NAMES` order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        let values = [
            self.error_codes.as_str(),
            self.provider.as_str(),
            self.phone_number.as_str(),
            self.identifier.as_str(),
            self.reporting_date.as_str(),
        ];
        FIELD_NAMES.iter().copied().zip(values)
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Record", FIELD_NAMES.len())?;
        for (name, value) in self.fields() {
            state.serialize_field(name, value)?;
        }
        state.end()
    }
}
