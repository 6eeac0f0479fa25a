//! Field decoders of the feed files.
//!
//! The feeds are assumed to come from curated sources, so a cell that cannot be
//! coerced never rejects its row: the field takes its zero value instead.

use crate::objects::RouteType;
use chrono::NaiveDate;
use rgb::RGB8;
use serde::de::{Deserialize, Deserializer};

fn parse_or_zero<T: std::str::FromStr + Default>(s: &str) -> T {
    s.trim().parse().unwrap_or_else(|_| {
        debug!("'{}' could not be parsed, using the default value", s);
        T::default()
    })
}

/// Seconds since midnight of a `H:MM:SS` time.
///
/// Hours may exceed 23 for trips running after midnight. A component that is
/// missing or not a number counts as 0, and anything after the third one is ignored.
pub fn parse_time(s: &str) -> u32 {
    let mut parts = s.split(':').map(|p| {
        if p.is_empty() {
            0
        } else {
            parse_or_zero::<u32>(p)
        }
    });
    let hours = parts.next().unwrap_or(0);
    let minutes = parts.next().unwrap_or(0);
    let seconds = parts.next().unwrap_or(0);
    hours
        .saturating_mul(3600)
        .saturating_add(minutes.saturating_mul(60))
        .saturating_add(seconds)
}

pub fn deserialize_time<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| parse_time(&s))
}

pub fn deserialize_optional_time<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| {
        if s.trim().is_empty() {
            None
        } else {
            Some(parse_time(&s))
        }
    })
}

pub fn de_lenient_float<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(de).map(|s| parse_or_zero(&s))
}

pub fn de_lenient_int<'de, D>(de: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(de).map(|s| parse_or_zero(&s))
}

pub fn de_trimmed<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(de).map(|s| s.trim().to_owned())
}

/// Used with `#[serde(default)]`: an absent column gives `None`, a present one
/// gives its trimmed value, even when empty
pub fn de_optional_trimmed<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    de_trimmed(de).map(Some)
}

pub fn deserialize_route_type<'de, D>(de: D) -> Result<RouteType, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(de).map(|s| {
        let code: u16 = parse_or_zero(&s);
        RouteType::from_code(code).unwrap_or_else(|| {
            debug!("unknown route type {}, using the default one", code);
            RouteType::default()
        })
    })
}

/// A day flag is set only by the exact value `1`
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s == "1")
}

pub fn deserialize_lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| NaiveDate::parse_from_str(s.trim(), "%Y%m%d").ok())
}

pub fn parse_color(s: &str) -> Result<RGB8, crate::Error> {
    if s.len() != 6 {
        return Err(crate::Error::InvalidColor(s.to_owned()));
    }
    let channel = |range: std::ops::Range<usize>| {
        s.get(range)
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .ok_or_else(|| crate::Error::InvalidColor(s.to_owned()))
    };
    Ok(RGB8::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

pub fn parse_optional_color(s: Option<&str>) -> Result<Option<RGB8>, crate::Error> {
    match s {
        None | Some("") => Ok(None),
        Some(c) => parse_color(c).map(Some),
    }
}
