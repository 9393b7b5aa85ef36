//! A small scripted data assistant over the fundamentals dataset.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use quantra_core::{DataProvider, QuantraError};
use quantra_types::{CoverageRequest, DataQuery, DataRow};

use crate::core::provider_call_with_timeout;
use crate::dataset::Dataset;

const WHOOPS_REQUEST: &str = "Whoops! I can't prepare that table for you. Try \"start date: \
                              1/4/2021, end date: 1/6/2021, gsid: 2\".";
const WHOOPS_ROWS: &str =
    "Whoops! I can't fetch those rows for you. Make sure the number of rows is appropriate!";
const WHOOPS_ROW: &str =
    "Whoops! I can't fetch that row for you. Make sure the row number is appropriate!";

/// Conversational helper that answers small talk and prepares fundamentals
/// tables on request.
///
/// The session keeps the last reply (so "what did you just say" can echo it)
/// and the last prepared table (so follow-up "row N" messages can page
/// through it). State is per session: two sessions never observe each other.
///
/// A table request names a date range and how many covered entities to
/// include, e.g. `start date: 1/4/2021, end date: 1/6/2021, gsid: 2`.
pub struct ChatSession {
    provider: Arc<dyn DataProvider>,
    first_name: String,
    last_response: String,
    table: Vec<DataRow>,
    timeout: Duration,
}

impl ChatSession {
    pub(crate) fn new(
        provider: Arc<dyn DataProvider>,
        first_name: String,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            first_name,
            last_response: String::new(),
            table: Vec::new(),
            timeout,
        }
    }

    /// Route one user message and produce the assistant's reply.
    ///
    /// Malformed table requests get a whoops reply rather than an error;
    /// only provider failures surface as errors.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying data query fails or exceeds the
    /// configured deadline.
    pub async fn send(&mut self, message: &str) -> Result<String, QuantraError> {
        let text = message.to_lowercase();
        let reply = if text.contains("hi") || text.contains("hello") {
            format!("Hello, {}, how are you doing?", self.first_name)
        } else if text.contains("how about you") {
            "I'm good.".to_string()
        } else if text.contains("what?") || text.contains("what did you just say") {
            format!("I said: \"{}\"", self.last_response)
        } else if text.contains("start date")
            && text.contains("end date")
            && text.contains("gsid")
        {
            match self.prepare_table(&text).await {
                Ok(reply) => reply,
                Err(QuantraError::InvalidArg(_)) => WHOOPS_REQUEST.to_string(),
                Err(other) => return Err(other),
            }
        } else if text.contains("multiple rows") {
            self.multiple_rows(&text)
        } else if text.contains("row") {
            self.single_row(&text)
        } else {
            "Sorry, I did not understand that. Could you rephrase?".to_string()
        };
        self.last_response.clone_from(&reply);
        Ok(reply)
    }

    /// Rows of the last prepared table.
    #[must_use]
    pub fn table(&self) -> &[DataRow] {
        &self.table
    }

    async fn prepare_table(&mut self, text: &str) -> Result<String, QuantraError> {
        let mut start = None;
        let mut end = None;
        let mut count = None;
        for section in text.split(',') {
            let Some((key, value)) = section.split_once(':') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            if key.contains("start date") {
                start = Some(parse_date(value)?);
            } else if key.contains("end date") {
                end = Some(parse_date(value)?);
            } else if key.contains("gsid") {
                count = Some(value.parse::<usize>().map_err(|_| {
                    QuantraError::invalid_arg(format!("could not parse gsid count '{value}'"))
                })?);
            }
        }
        let (Some(start), Some(end), Some(count)) = (start, end, count) else {
            return Err(QuantraError::invalid_arg(
                "a table request needs a start date, an end date, and a gsid count",
            ));
        };

        // The first `count` covered entities, in coverage order.
        let coverage = provider_call_with_timeout(
            "fundamentals coverage",
            self.timeout,
            self.provider.coverage(
                Dataset::USCANFPP_MINI,
                &CoverageRequest {
                    limit: count,
                    ..CoverageRequest::default()
                },
            ),
        )
        .await?;
        let gsids: Vec<String> = coverage
            .iter()
            .filter_map(|row| row.text("gsid"))
            .take(count)
            .map(ToString::to_string)
            .collect();

        let query = DataQuery::range(start, end).with_filter("gsid", gsids);
        self.table = provider_call_with_timeout(
            "fundamentals table",
            self.timeout,
            self.provider.query(Dataset::USCANFPP_MINI, &query),
        )
        .await?;
        Ok(format!(
            "I've prepared a table for you. It has {} rows since it corresponds to that many \
             days. Which row would you like to see? If multiple rows please type \"multiple \
             rows: start_row end_row\".",
            self.table.len()
        ))
    }

    fn single_row(&self, text: &str) -> String {
        let Some(index) = numbers(text).first().copied().filter(|n| *n >= 1) else {
            return WHOOPS_ROW.to_string();
        };
        self.table
            .get(index - 1)
            .map_or_else(|| WHOOPS_ROW.to_string(), render_row)
    }

    fn multiple_rows(&self, text: &str) -> String {
        let bounds = numbers(text);
        let [start, end] = bounds.as_slice() else {
            return WHOOPS_ROWS.to_string();
        };
        if *start < 1 || end < start || *end > self.table.len() {
            return WHOOPS_ROWS.to_string();
        }
        self.table[start - 1..*end]
            .iter()
            .map(render_row)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parse a `month/day/year` date, e.g. `1/4/2021`.
fn parse_date(value: &str) -> Result<NaiveDate, QuantraError> {
    NaiveDate::parse_from_str(value, "%m/%d/%Y")
        .map_err(|_| QuantraError::invalid_arg(format!("could not parse date '{value}'")))
}

/// Row numbers mentioned in a message, in order of appearance.
fn numbers(text: &str) -> Vec<usize> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse().ok())
        .collect()
}

fn render_row(row: &DataRow) -> String {
    let mut parts = Vec::with_capacity(row.fields.len() + 1);
    if let Some(date) = row.date {
        parts.push(format!("date: {date}"));
    }
    for (name, value) in &row.fields {
        let rendered = value
            .as_str()
            .map_or_else(|| value.to_string(), ToString::to_string);
        parts.push(format!("{name}: {rendered}"));
    }
    parts.join(", ")
}
