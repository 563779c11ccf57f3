use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::str::FromStr;

/// Builds the header set sent with every gateway request.
///
/// `lines` are `Name: value` pairs from the config file. Lines that do not
/// parse as a valid header are skipped with a warning.
pub fn gateway_headers<S: AsRef<str>>(lines: &[S]) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for line in lines {
        let line = line.as_ref().trim();
        let Some((key, value)) = line.split_once(':') else {
            tracing::warn!(line, "Skipping header line without ':'");
            continue;
        };

        let key = key.trim().to_lowercase();
        let value = value.trim();

        match (HeaderName::from_str(&key), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!(header = %key, "Skipping invalid header"),
        }
    }

    // Bodies are always JSON
    headers.insert(
        HeaderName::from_static("content-type"),
        HeaderValue::from_static("application/json"),
    );

    headers
}
