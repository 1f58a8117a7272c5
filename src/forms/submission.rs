//! Parsing submitted form bodies into [`SubmittedData`]

use super::element::{SubmittedData, SubmittedValue};
use url::form_urlencoded;

/// Parse an `application/x-www-form-urlencoded` body.
///
/// A plain name submitted more than once keeps its last value. Names ending
/// in `[]` collect every value, stored under the name without the suffix.
pub fn parse_urlencoded(body: &str) -> SubmittedData {
    let mut data = SubmittedData::new();
    for (name, value) in form_urlencoded::parse(body.as_bytes()) {
        match name.strip_suffix("[]") {
            Some(key) => match data
                .entry(key.to_string())
                .or_insert_with(|| SubmittedValue::Multiple(Vec::new()))
            {
                SubmittedValue::Multiple(values) => values.push(value.into_owned()),
                single => {
                    tracing::debug!(field = key, "array field replaces plain value");
                    *single = SubmittedValue::Multiple(vec![value.into_owned()]);
                }
            },
            None => {
                data.insert(name.into_owned(), SubmittedValue::Single(value.into_owned()));
            }
        }
    }
    data
}
