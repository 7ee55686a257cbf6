use once_cell::sync::Lazy;
use regex::Regex;

// [date], "quoted request" or a bare space-delimited token
static LINE_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\[.+?\]|[^"\s]\S*|".+?""#).expect("valid line item pattern"));

static SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"/[^"\s/]+"#).expect("valid section pattern"));

const REQUIRED_FIELDS: usize = 7;

/// The seven Common Log Format fields, borrowed from the raw line.
///
/// See <https://www.w3.org/Daemon/User/Config/Logging.html#common-logfile-format>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    pub remote_host: &'a str,
    pub identity: &'a str,
    pub auth_user: &'a str,
    /// Still wrapped in `[...]`.
    pub date: &'a str,
    /// Request line without the surrounding quotes.
    pub request: &'a str,
    pub status: &'a str,
    pub size: &'a str,
}

/// Split a raw line into CLF fields.
///
/// Trailing fields (referer, user agent, ...) are ignored. Returns `None` when fewer
/// than seven fields are present.
pub fn parse_line(line: &str) -> Option<ParsedLine<'_>> {
    let mut items = LINE_ITEM.find_iter(line).map(|m| m.as_str());

    let mut fields = [""; REQUIRED_FIELDS];
    for field in &mut fields {
        *field = items.next()?;
    }

    let [remote_host, identity, auth_user, date, request, status, size] = fields;
    let request = request.trim_matches('"');
    if request.is_empty() {
        return None;
    }

    Some(ParsedLine {
        remote_host,
        identity,
        auth_user,
        date,
        request,
        status,
        size,
    })
}

/// Leading path segment of the request target, or an empty string.
///
/// `GET /item/august/13903079 HTTP/1.1` → `/item`. Only the target is searched so the
/// protocol version (`HTTP/1.1`) never counts as a section.
pub fn section_from_request(request: &str) -> String {
    let request = request.trim_matches('"');
    let mut parts = request.split_whitespace();
    let first = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or(first);

    SECTION
        .find(target)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
