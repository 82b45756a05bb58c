use std::io::Write;

use tracing::debug;

use crate::cliopt::CliOpt;
use crate::encoder::{
    encode_by_content_type, Encoder, JsonEncoder, MultipartEncoder, UrlFormEncoder, XmlEncoder,
    SUPPORTED_CONTENT_TYPES,
};
use crate::error::Result;
use crate::model::Record;
use crate::output::{LineWriter, Output};

/// Direct encoders, printed in this order.
fn payload_encoders() -> Vec<(&'static str, Box<dyn Encoder>)> {
    vec![
        ("json", Box::new(JsonEncoder::new()) as Box<dyn Encoder>),
        ("xml", Box::new(XmlEncoder::new(true)) as Box<dyn Encoder>),
        ("xml no header", Box::new(XmlEncoder::new(false)) as Box<dyn Encoder>),
        ("encoded values", Box::new(UrlFormEncoder::new()) as Box<dyn Encoder>),
        ("multipart", Box::new(MultipartEncoder::new()) as Box<dyn Encoder>),
    ]
}

/// Prints the record, then its encoding by every direct encoder and by each
/// requested content type. Encoding failures are printed, not returned; only
/// write failures abort the run.
pub fn run<W: Write>(opt: &CliOpt, writer: W) -> Result<W> {
    let record = opt.record();
    debug!(?record, "running");

    let mut output = Output::new(LineWriter::new(writer));
    output.record(&record)?;

    if !opt.skip_payloads {
        print_payloads(&mut output, &record)?;
    }

    let content_types: Vec<&str> = if opt.content_types.is_empty() {
        SUPPORTED_CONTENT_TYPES.to_vec()
    } else {
        opt.content_types.iter().map(String::as_str).collect()
    };
    print_by_content_type(&mut output, &record, &content_types)?;

    output.into_inner()
}

fn print_payloads<W: Write>(output: &mut Output<W>, record: &Record) -> Result<()> {
    output.heading("Testing by Payload")?;
    for (name, encoder) in payload_encoders() {
        output.indented_section("Payload", name, &encoder.encode(record))?;
    }
    Ok(())
}

fn print_by_content_type<W: Write>(
    output: &mut Output<W>,
    record: &Record,
    content_types: &[&str],
) -> Result<()> {
    output.heading("Testing by content-type")?;
    for content_type in content_types {
        output.section(
            "contentType",
            content_type,
            &encode_by_content_type(record, content_type),
        )?;
    }
    Ok(())
}
