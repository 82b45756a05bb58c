use std::collections::BTreeMap;
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, take_while1},
    character::complete::{anychar, char as nom_char, space0},
    combinator::{all_consuming, map, opt, recognize},
    multi::many0,
    sequence::{delimited, pair, preceded, separated_pair, tuple},
};
use tracing::debug;

use super::encoder::EncodeFn;
use super::form::encode_url_form;
use super::json::encode_json;
use super::multipart::encode_multipart;
use super::xml::encode_xml;
use crate::error::{Error, Result};
use crate::model::Record;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const XML_CONTENT_TYPE: &str = "application/xml";
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";
pub const URL_ENCODED_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub const SUPPORTED_CONTENT_TYPES: [&str; 4] = [
    JSON_CONTENT_TYPE,
    XML_CONTENT_TYPE,
    MULTIPART_CONTENT_TYPE,
    URL_ENCODED_CONTENT_TYPE,
];

static ENCODERS: [(&str, EncodeFn); 4] = [
    (JSON_CONTENT_TYPE, encode_json),
    (XML_CONTENT_TYPE, encode_xml_with_header),
    (MULTIPART_CONTENT_TYPE, encode_multipart),
    (URL_ENCODED_CONTENT_TYPE, encode_url_form),
];

fn encode_xml_with_header(record: &Record) -> Result<Vec<u8>> {
    encode_xml(record, true)
}

/// Encodes the record in the format named by `content_type`. Parameters such
/// as `charset` are accepted but do not take part in the lookup.
pub fn encode_by_content_type(record: &Record, content_type: &str) -> Result<Vec<u8>> {
    let media_type: MediaType = content_type.parse()?;

    match ENCODERS
        .iter()
        .find(|(essence, _)| *essence == media_type.essence())
    {
        Some((essence, encode)) => {
            debug!(content_type, "dispatching to {} encoder", essence);
            encode(record)
        }
        None => Err(Error::unsupported_content_type(format!(
            "unsupported content-type '{}'",
            media_type.essence()
        ))),
    }
}

/// A parsed MIME media type: lower-cased `type/subtype` plus parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    essence: String,
    params: BTreeMap<String, String>,
}

impl MediaType {
    pub fn essence(&self) -> &str {
        &self.essence
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::invalid_content_type(format!("invalid content-type '{}'", s));

        let (_, (essence, raw_params)) = all_consuming(media_type)(s).map_err(|_| invalid())?;

        let mut params = BTreeMap::new();
        for (name, value) in raw_params {
            if params.insert(name.to_ascii_lowercase(), value).is_some() {
                return Err(Error::invalid_content_type(format!(
                    "invalid content-type '{}': duplicate parameter '{}'",
                    s, name
                )));
            }
        }

        Ok(Self {
            essence: essence.to_ascii_lowercase(),
            params,
        })
    }
}

type IResult<'a, O> = nom::IResult<&'a str, O>;

fn is_token_char(c: char) -> bool {
    c.is_ascii() && !c.is_ascii_control() && !"()<>@,;:\\\"/[]?= ".contains(c)
}

fn token(input: &str) -> IResult<&str> {
    take_while1(is_token_char)(input)
}

// "..." with backslash escapes, unquoted and unescaped.
fn quoted_string(input: &str) -> IResult<String> {
    delimited(
        nom_char('"'),
        map(
            opt(escaped_transform(is_not("\\\""), '\\', anychar)),
            Option::unwrap_or_default,
        ),
        nom_char('"'),
    )(input)
}

fn parameter(input: &str) -> IResult<(&str, String)> {
    separated_pair(
        token,
        nom_char('='),
        alt((map(token, String::from), quoted_string)),
    )(input)
}

// token [ "/" token ] *( OWS ";" OWS parameter ) [ OWS ";" ] OWS
fn media_type(input: &str) -> IResult<(&str, Vec<(&str, String)>)> {
    let (rest, essence) = preceded(
        space0,
        recognize(pair(token, opt(preceded(nom_char('/'), token)))),
    )(input)?;

    let (rest, params) = many0(preceded(
        delimited(space0, nom_char(';'), space0),
        parameter,
    ))(rest)?;

    let (rest, _) = trailing_semicolon(rest)?;

    Ok((rest, (essence, params)))
}

fn trailing_semicolon(input: &str) -> IResult<()> {
    map(tuple((opt(pair(space0, nom_char(';'))), space0)), |_| ())(input)
}
