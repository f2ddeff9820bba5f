//! Time helpers pinned to UTC+8.
//!
//! The backend records everything in Beijing wall-clock time, so every date
//! shown to the user and every date sent as a filter is computed under a
//! fixed `+08:00` offset. Nothing here consults the host's local offset.

use time::format_description::well_known::{Iso8601, Rfc3339};
use time::macros::offset;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// The fixed offset all helpers convert to.
pub const BEIJING: UtcOffset = offset!(+8);

/// Current instant as UTC+8 wall clock.
pub fn now() -> OffsetDateTime {
    to_beijing(OffsetDateTime::now_utc())
}

/// Today's date under UTC+8, as `YYYY-MM-DD`.
pub fn today() -> String {
    today_at(OffsetDateTime::now_utc())
}

/// The UTC+8 calendar date containing `instant`, as `YYYY-MM-DD`.
pub fn today_at(instant: OffsetDateTime) -> String {
    format_date(instant)
}

/// Today's date under UTC+8.
pub fn today_date() -> Date {
    now().date()
}

pub fn to_beijing(instant: OffsetDateTime) -> OffsetDateTime {
    instant.to_offset(BEIJING)
}

/// `YYYY-MM-DD` of `instant` under UTC+8.
pub fn format_date(instant: OffsetDateTime) -> String {
    iso_date(to_beijing(instant).date())
}

pub fn iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Which parts of an instant [`format`] renders.
///
/// Unset fields fall back to the zone defaults, which render everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    pub date: Option<bool>,
    pub time: Option<bool>,
    pub seconds: Option<bool>,
}

impl FormatOptions {
    /// `HH:MM` only.
    pub const fn time_only() -> Self {
        Self {
            date: Some(false),
            time: Some(true),
            seconds: Some(false),
        }
    }

    /// Date and `HH:MM`, no seconds.
    pub const fn without_seconds() -> Self {
        Self {
            date: None,
            time: None,
            seconds: Some(false),
        }
    }

    fn merged(self) -> (bool, bool, bool) {
        (
            self.date.unwrap_or(true),
            self.time.unwrap_or(true),
            self.seconds.unwrap_or(true),
        )
    }
}

/// Render `instant` under UTC+8, e.g. `2024/6/2 07:30:00`.
pub fn format(instant: OffsetDateTime, options: FormatOptions) -> String {
    let local = to_beijing(instant);
    let (with_date, with_time, with_seconds) = options.merged();

    let mut parts = Vec::with_capacity(2);
    if with_date {
        parts.push(format!(
            "{}/{}/{}",
            local.year(),
            u8::from(local.month()),
            local.day()
        ));
    }
    if with_time {
        let mut clock = format!("{:02}:{:02}", local.hour(), local.minute());
        if with_seconds {
            clock.push_str(&format!(":{:02}", local.second()));
        }
        parts.push(clock);
    }
    parts.join(" ")
}

/// First and last second of `date` under UTC+8, as ISO instants with an
/// explicit `+08:00` offset.
pub fn day_bounds(date: Date) -> (String, String) {
    let day = iso_date(date);
    (
        format!("{day}T00:00:00+08:00"),
        format!("{day}T23:59:59+08:00"),
    )
}

/// Parse a `YYYY-MM-DD` string.
pub fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    Date::parse(value.trim(), format)
}

/// Parse a backend timestamp. Values carrying an offset are taken as-is;
/// naive values are UTC+8 wall clock.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, time::error::Parse> {
    match OffsetDateTime::parse(value, &Rfc3339) {
        Ok(instant) => Ok(instant),
        Err(_) => PrimitiveDateTime::parse(value, &Iso8601::DEFAULT)
            .map(|naive| naive.assume_offset(BEIJING)),
    }
}

/// Serde adapter for [`parse_timestamp`], serializing back as RFC 3339.
pub mod timestamp {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::format_description::well_known::Rfc3339;
    use time::OffsetDateTime;

    pub fn serialize<S: Serializer>(
        value: &OffsetDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let raw = value
            .format(&Rfc3339)
            .map_err(<S::Error as serde::ser::Error>::custom)?;
        serializer.serialize_str(&raw)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<OffsetDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(de::Error::custom)
    }
}

/// Serde adapter for `YYYY-MM-DD` dates.
pub mod date {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(value: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::iso_date(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(de::Error::custom)
    }
}
