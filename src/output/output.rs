use std::io::Write;

use super::writer::LineWriter;
use crate::error::Result;
use crate::model::Record;

const RULER: &str = "--------------------------";

/// Prints encoded payloads as titled sections.
pub struct Output<W> {
    writer: LineWriter<W>,
}

impl<W: Write> Output<W> {
    pub fn new(writer: LineWriter<W>) -> Self {
        Self { writer }
    }

    pub fn heading(&mut self, title: &str) -> Result<()> {
        self.writer
            .write(title.as_bytes())
            .map_err(|e| ("writer failed", e))?;
        Ok(())
    }

    /// Dumps the record being encoded, followed by an empty line.
    pub fn record(&mut self, record: &Record) -> Result<()> {
        let dump = format!("\t{:?}", record);
        let lines: [&[u8]; 3] = [b"record:", dump.as_bytes(), b""];
        for line in lines {
            self.writer.write(line).map_err(|e| ("writer failed", e))?;
        }
        Ok(())
    }

    /// Writes one section; a failed encoding is reported inside the section.
    pub fn section(&mut self, label: &str, name: &str, payload: &Result<Vec<u8>>) -> Result<()> {
        self.write_section(label, name, "", payload)
    }

    /// Like `section`, with the payload indented by a tab.
    pub fn indented_section(
        &mut self,
        label: &str,
        name: &str,
        payload: &Result<Vec<u8>>,
    ) -> Result<()> {
        self.write_section(label, name, "\t", payload)
    }

    fn write_section(
        &mut self,
        label: &str,
        name: &str,
        indent: &str,
        payload: &Result<Vec<u8>>,
    ) -> Result<()> {
        let title = format!("{} {}: {}", RULER, label, name);
        let mut body = indent.as_bytes().to_vec();
        match payload {
            Ok(buf) => body.extend_from_slice(buf),
            Err(err) => body.extend_from_slice(format!("error >>> {}", err).as_bytes()),
        }

        let lines: [&[u8]; 4] = [title.as_bytes(), &body, RULER.as_bytes(), b""];
        for line in lines {
            self.writer.write(line).map_err(|e| ("writer failed", e))?;
        }
        Ok(())
    }

    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush().map_err(|e| ("writer failed", e))?;
        Ok(self.writer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections() -> Result<()> {
        let mut output = Output::new(LineWriter::new(Vec::new()));
        output.heading("Testing")?;
        output.indented_section("Payload", "json", &Ok(b"{}".to_vec()))?;
        output.section("contentType", "text/plain", &Err("nope".into()))?;

        assert_eq!(
            "Testing\n\
             -------------------------- Payload: json\n\
             \t{}\n\
             --------------------------\n\
             \n\
             -------------------------- contentType: text/plain\n\
             error >>> nope\n\
             --------------------------\n\
             \n",
            String::from_utf8_lossy(&output.into_inner()?)
        );
        Ok(())
    }

    #[test]
    fn test_record_dump() -> Result<()> {
        let mut output = Output::new(LineWriter::new(Vec::new()));
        output.record(&Record::new("1", "p", "2", "id", "now"))?;

        assert_eq!(
            "record:\n\
             \tRecord { error_codes: \"1\", provider: \"p\", phone_number: \"2\", \
             identifier: \"id\", reporting_date: \"now\" }\n\
             \n",
            String::from_utf8_lossy(&output.into_inner()?)
        );
        Ok(())
    }
}
