//! CSV output format.

use quarry_types::{Bar, EnrichedRecord};
use std::borrow::Cow;
use std::io::Write;

use crate::{FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone, Default)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }

    // Names come from the upstream list and may contain anything.
    fn quote<'a>(&self, field: &'a str) -> Cow<'a, str> {
        if field.contains([self.delimiter, '"', '\n', '\r']) {
            Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
        } else {
            Cow::Borrowed(field)
        }
    }
}

impl Formatter for CsvFormatter {
    fn write_results<W: Write + Send>(
        &self,
        records: &[EnrichedRecord],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(
                writer,
                "code{d}name{d}price{d}change_pct{d}amount{d}volume_ratio{d}turnover_rate{d}\
                 market_cap{d}pe{d}ma5{d}ma10{d}ma20{d}ma60{d}ma60_up{d}macd_histogram{d}\
                 macd_golden_cross"
            )?;
        }

        for record in records {
            let q = &record.quote;
            let i = &record.indicators;
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                self.quote(&q.code),
                self.quote(&q.name),
                q.price,
                q.change_pct,
                q.amount,
                q.volume_ratio,
                q.turnover_rate,
                q.market_cap,
                q.pe,
                i.ma5,
                i.ma10,
                i.ma20,
                i.ma60,
                i.ma60_up,
                i.macd_histogram,
                i.macd_golden_cross
            )?;
        }

        Ok(())
    }

    fn write_bars<W: Write + Send>(&self, bars: &[Bar], mut writer: W) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "date{d}open{d}close{d}volume")?;
        }

        for bar in bars {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}",
                bar.date.format("%Y-%m-%d"),
                bar.open,
                bar.close,
                bar.volume
            )?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == '\t' { "tsv" } else { "csv" }
    }
}
