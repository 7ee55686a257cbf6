//! Access-log records and the Common Log Format parser that produces them.
//!
//! A raw line goes through [`parse_line`] (tokenize into the seven CLF fields) and
//! [`LogEvent::from_parsed`] (numeric coercion plus section extraction). Lines that do
//! not carry seven fields never become events.

mod parse;
mod types;


pub use parse::{ParsedLine, parse_line, section_from_request};
pub use types::LogEvent;
