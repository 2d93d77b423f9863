// Copyright 2023 Greptime Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::{Display, Formatter, Write};
use std::str::FromStr;

use chrono::{FixedOffset, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use snafu::{ensure, OptionExt};

use crate::error::{Error, InvalidOffsetSnafu, InvalidTimeSnafu, ParseTimeTzSnafu, Result};
use crate::precision::{TimePrecision, NANOSECOND_DIGITS};

pub const NANOS_PER_MILLISECOND: i64 = 1_000_000;
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
pub const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;
pub const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;

/// Largest accepted distance from UTC, in minutes. Real world offsets range
/// from -12:00 to +14:00, both ends are bounded by 14 hours.
pub const MAX_OFFSET_MINUTES: i64 = 14 * 60;

/// Width of the biased offset field in the packed `i64` form. 11 bits hold
/// `[0, 2 * MAX_OFFSET_MINUTES]`.
const OFFSET_BITS: u32 = 11;
const OFFSET_MASK: i64 = (1 << OFFSET_BITS) - 1;

lazy_static! {
    static ref TIME_TZ_PATTERN: Regex = Regex::new(
        r"^(?P<hour>\d{1,2}):(?P<minute>\d{2})(?::(?P<second>\d{2})(?:\.(?P<fraction>\d{1,12}))?)?\s*(?P<sign>[+-])(?P<offset_hour>\d{2}):(?P<offset_minute>\d{2})$"
    )
    .unwrap();
}

/// A time of day with a fixed UTC offset, i.e. a `time(p) with time zone` value.
///
/// The local clock reading is kept at nanosecond resolution regardless of the
/// declared precision of its type. Both parts are validated together on
/// construction and the value is immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TimeTz {
    nanos_of_day: i64,
    offset_minutes: i16,
}

impl TimeTz {
    /// Creates a time with time zone from the nanoseconds elapsed since local
    /// midnight and the offset from UTC in minutes.
    pub fn try_new(nanos_of_day: i64, offset_minutes: i64) -> Result<Self> {
        ensure!(
            (-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&offset_minutes),
            InvalidOffsetSnafu { offset_minutes }
        );
        ensure!(
            (0..NANOS_PER_DAY).contains(&nanos_of_day),
            InvalidTimeSnafu {
                nanos: nanos_of_day
            }
        );

        Ok(Self {
            nanos_of_day,
            offset_minutes: offset_minutes as i16,
        })
    }

    /// Returns the local time of day in nanoseconds since midnight.
    pub fn nanos_of_day(&self) -> i64 {
        self.nanos_of_day
    }

    /// Returns the signed offset from UTC in minutes.
    pub fn offset_minutes(&self) -> i16 {
        self.offset_minutes
    }

    /// Splits the value into `(nanos_of_day, offset_minutes)`.
    pub fn unpack(&self) -> (i64, i16) {
        (self.nanos_of_day, self.offset_minutes)
    }

    /// Packs the value into a single `i64`: the nanoseconds of day in the high
    /// bits and the offset, biased by [MAX_OFFSET_MINUTES], in the low 11 bits.
    pub fn to_packed_i64(&self) -> i64 {
        (self.nanos_of_day << OFFSET_BITS) | (self.offset_minutes as i64 + MAX_OFFSET_MINUTES)
    }

    /// Decodes a value produced by [TimeTz::to_packed_i64].
    pub fn try_from_packed_i64(packed: i64) -> Result<Self> {
        let offset_minutes = (packed & OFFSET_MASK) - MAX_OFFSET_MINUTES;
        let nanos_of_day = packed >> OFFSET_BITS;
        Self::try_new(nanos_of_day, offset_minutes)
    }

    /// Parses a literal like `12:34:56.789+08:35`.
    ///
    /// Returns the value together with the precision the literal was written
    /// in, which is the number of fractional second digits (0 to 12). Digits
    /// beyond nanosecond resolution are truncated.
    pub fn parse_literal(s: &str) -> Result<(TimeTz, TimePrecision)> {
        let caps = TIME_TZ_PATTERN
            .captures(s.trim())
            .context(ParseTimeTzSnafu { raw: s })?;
        let number = |name: &str| -> i64 {
            caps.name(name)
                .map_or(0, |m| m.as_str().parse().unwrap_or_default())
        };

        let (hour, minute, second) = (number("hour"), number("minute"), number("second"));
        let (offset_hour, offset_minute) = (number("offset_hour"), number("offset_minute"));
        ensure!(
            hour < 24 && minute < 60 && second < 60 && offset_minute < 60,
            ParseTimeTzSnafu { raw: s }
        );

        let fraction = caps.name("fraction").map_or("", |m| m.as_str());
        let digits = fraction.len() as u32;
        let sub_second_nanos = if digits <= NANOSECOND_DIGITS as u32 {
            fraction.parse::<i64>().unwrap_or_default() * 10i64.pow(NANOSECOND_DIGITS as u32 - digits)
        } else {
            fraction[..NANOSECOND_DIGITS as usize]
                .parse::<i64>()
                .unwrap_or_default()
        };

        let sign = if &caps["sign"] == "-" { -1 } else { 1 };
        let value = TimeTz::try_new(
            hour * NANOS_PER_HOUR
                + minute * NANOS_PER_MINUTE
                + second * NANOS_PER_SECOND
                + sub_second_nanos,
            sign * (offset_hour * 60 + offset_minute),
        )?;
        let precision = TimePrecision::try_new(digits as i64)?;

        Ok((value, precision))
    }

    /// Formats the value with exactly `precision` fractional second digits,
    /// e.g. `12:34:56.120+08:35` for precision 3.
    pub fn to_string_with_precision(&self, precision: TimePrecision) -> String {
        let mut out = self.clock_string();
        let digits = precision.value() as u32;
        if digits > 0 {
            let fraction = self.nanos_of_day % NANOS_PER_SECOND;
            let nanosecond_digits = NANOSECOND_DIGITS as u32;
            let scaled = if digits <= nanosecond_digits {
                fraction / 10i64.pow(nanosecond_digits - digits)
            } else {
                fraction * 10i64.pow(digits - nanosecond_digits)
            };
            let _ = write!(out, ".{:0width$}", scaled, width = digits as usize);
        }
        out.push_str(&self.offset_string());
        out
    }

    /// Converts into chrono's local time and fixed offset.
    pub fn to_chrono(&self) -> Option<(NaiveTime, FixedOffset)> {
        let secs = u32::try_from(self.nanos_of_day / NANOS_PER_SECOND).ok()?;
        let nanos = u32::try_from(self.nanos_of_day % NANOS_PER_SECOND).ok()?;
        let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)?;
        let offset = FixedOffset::east_opt(self.offset_minutes as i32 * 60)?;
        Some((time, offset))
    }

    fn clock_string(&self) -> String {
        let secs = self.nanos_of_day / NANOS_PER_SECOND;
        format!("{:02}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
    }

    fn offset_string(&self) -> String {
        let sign = if self.offset_minutes < 0 { '-' } else { '+' };
        let abs = self.offset_minutes.unsigned_abs();
        format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
    }
}

impl FromStr for TimeTz {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_literal(s).map(|(value, _)| value)
    }
}

impl Display for TimeTz {
    /// Prints the clock reading with as many fractional digits as needed,
    /// followed by the offset.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.clock_string())?;
        let fraction = self.nanos_of_day % NANOS_PER_SECOND;
        if fraction != 0 {
            let digits = format!("{fraction:09}");
            write!(f, ".{}", digits.trim_end_matches('0'))?;
        }
        f.write_str(&self.offset_string())
    }
}

impl From<TimeTz> for i64 {
    fn from(t: TimeTz) -> Self {
        t.to_packed_i64()
    }
}

impl TryFrom<i64> for TimeTz {
    type Error = Error;

    fn try_from(packed: i64) -> Result<Self> {
        Self::try_from_packed_i64(packed)
    }
}
