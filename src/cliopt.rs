use structopt::StructOpt;

use crate::common::time::now_reporting_date;
use crate::model::Record;

#[derive(Debug, StructOpt)]
#[structopt(name = "payloads", about = "Encode a report record by format and by content-type")]
pub struct CliOpt {
    #[structopt(long = "error-codes", default_value = "000")]
    pub error_codes: String,

    #[structopt(long = "provider", default_value = "Bla Bla Bla")]
    pub provider: String,

    #[structopt(long = "phone-number", default_value = "1234567890")]
    pub phone_number: String,

    #[structopt(long = "identifier", default_value = "foo-bar-baz")]
    pub identifier: String,

    /// Defaults to the current local time.
    #[structopt(long = "reporting-date")]
    pub reporting_date: Option<String>,

    /// Content types to encode by. Defaults to every supported one.
    #[structopt(long = "content-type", short = "c", number_of_values = 1)]
    pub content_types: Vec<String>,

    /// Only print the by-content-type section.
    #[structopt(long = "skip-payloads")]
    pub skip_payloads: bool,

    #[structopt(long = "verbose", short = "v")]
    pub verbose: bool,
}

impl CliOpt {
    pub fn record(&self) -> Record {
        Record::new(
            self.error_codes.as_str(),
            self.provider.as_str(),
            self.phone_number.as_str(),
            self.identifier.as_str(),
            self.reporting_date
                .clone()
                .unwrap_or_else(now_reporting_date),
        )
    }
}
