use crate::event::parse::{ParsedLine, parse_line, section_from_request};
use chrono::{DateTime, FixedOffset};

const CLF_DATE_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// One parsed access-log line.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    pub remote_host: String,
    /// rfc931 identity, usually `-`
    pub identity: String,
    pub auth_user: String,
    /// None when the bracketed date does not parse; the event still counts.
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub request: String,
    pub status: Option<u16>,
    /// Response size in bytes; `-` and other non-numeric values become 0.
    pub size: u64,
    /// Leading path segment of the request target, e.g. `/item`.
    pub section: String,
}

impl LogEvent {
    pub fn from_parsed(parsed: ParsedLine<'_>) -> Self {
        let timestamp = DateTime::parse_from_str(
            parsed.date.trim_start_matches('[').trim_end_matches(']'),
            CLF_DATE_FORMAT,
        )
        .ok();

        Self {
            remote_host: parsed.remote_host.to_string(),
            identity: parsed.identity.to_string(),
            auth_user: parsed.auth_user.to_string(),
            timestamp,
            section: section_from_request(parsed.request),
            request: parsed.request.to_string(),
            status: parsed.status.parse().ok(),
            size: parsed.size.parse().unwrap_or(0),
        }
    }

    /// Parse a raw line; `None` means the line is dropped.
    pub fn from_line(line: &str) -> Option<Self> {
        parse_line(line).map(Self::from_parsed)
    }
}
