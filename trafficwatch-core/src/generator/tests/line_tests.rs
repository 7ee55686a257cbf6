use crate::event::LogEvent;
use crate::generator::{HTTP_METHODS, LineGenerator, STATUSES, URLS, USERNAMES};
use chrono::{Local, TimeDelta};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn generator() -> LineGenerator {
    LineGenerator::with_rng(StdRng::seed_from_u64(7))
}

#[test]
fn random_lines_parse_into_events() {
    let mut lines = generator();

    for _ in 0..200 {
        let line = lines.next_line();
        let event = LogEvent::from_line(&line).unwrap_or_else(|| panic!("unparsable: {line}"));

        assert!(USERNAMES.contains(&event.auth_user.as_str()));
        assert!(STATUSES.contains(&event.status.unwrap()));
        assert!(event.size < 80_000);
        assert!(event.timestamp.is_some(), "{line}");
        assert_eq!(event.remote_host.split('.').count(), 4);

        let mut request = event.request.split_whitespace();
        assert!(HTTP_METHODS.contains(&request.next().unwrap()));
        let url = request.next().unwrap();
        assert!(URLS.contains(&url));
        assert!(url.starts_with(&event.section));
        assert!(!event.section.is_empty());
    }
}

#[test]
fn date_refreshes_once_per_second() {
    // Arrange
    let mut lines = generator();
    let now = Local::now() + TimeDelta::seconds(5);
    let date = |line: &str| LogEvent::from_line(line).unwrap().timestamp.unwrap();

    // Act
    let first = date(&lines.line_at(now));
    let same_second = date(&lines.line_at(now + TimeDelta::milliseconds(400)));
    let later = date(&lines.line_at(now + TimeDelta::seconds(2)));

    // Assert
    assert_eq!(first, same_second);
    assert_eq!((later - first).num_seconds(), 2);
}
