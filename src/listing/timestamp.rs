use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

/// Format used by the build server's listing template, e.g. `2024-01-05 13:30`.
pub const LISTING_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// chrono accepts unpadded fields and a leading sign, the listing never has them.
fn listing_time_regex() -> &'static Regex {
    static LISTING_TIME_RE: OnceLock<Regex> = OnceLock::new();
    LISTING_TIME_RE
        .get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$").expect("invalid listing time regex"))
}

/// Last-modified time of a listing row.
///
/// Unparseable text becomes [`Timestamp::INVALID`] instead of an error. The
/// invalid value orders before every valid one, so a newest-first sort puts
/// it last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(Option<NaiveDateTime>);

impl Timestamp {
    pub const INVALID: Timestamp = Timestamp(None);

    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if !listing_time_regex().is_match(text) {
            return Timestamp::INVALID;
        }
        Timestamp(NaiveDateTime::parse_from_str(text, LISTING_TIME_FORMAT).ok())
    }

    #[cfg(test)]
    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(at) => write!(f, "{}", at.format(LISTING_TIME_FORMAT)),
            None => f.write_str("-"),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(at) => serializer.serialize_some(&at.format(LISTING_TIME_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }
}
