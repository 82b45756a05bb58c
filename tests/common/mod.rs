#![allow(dead_code)]

use payloads::model::Record;

pub fn sample_record() -> Record {
    Record::new(
        "000",
        "Bla Bla Bla",
        "1234567890",
        "foo-bar-baz",
        "2024-01-01 00:00:00 Z00:00",
    )
}

/// (name, body) of every part of a multipart/form-data body. The boundary is
/// taken from the first delimiter line.
pub fn parse_multipart(body: &[u8]) -> Vec<(String, String)> {
    let body = std::str::from_utf8(body).expect("multipart body is not UTF-8");

    let first_line = body.split("\r\n").next().expect("empty multipart body");
    let boundary = first_line
        .strip_prefix("--")
        .expect("body does not start with a delimiter");
    assert!(!boundary.is_empty(), "empty boundary");

    let closing = format!("\r\n--{}--\r\n", boundary);
    assert!(body.ends_with(&closing), "missing closing delimiter: {:?}", body);

    let inner = &body[first_line.len() + 2..body.len() - closing.len()];
    inner
        .split(&format!("\r\n--{}\r\n", boundary))
        .map(|part| {
            let (headers, value) = part
                .split_once("\r\n\r\n")
                .expect("part without header separator");
            let name = headers
                .strip_prefix("Content-Disposition: form-data; name=\"")
                .and_then(|rest| rest.strip_suffix('"'))
                .unwrap_or_else(|| panic!("unexpected part headers: {:?}", headers));
            (name.to_string(), value.to_string())
        })
        .collect()
}

/// Decoded (key, value) pairs of an URL-encoded form, in wire order.
pub fn parse_url_form(body: &[u8]) -> Vec<(String, String)> {
    form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
