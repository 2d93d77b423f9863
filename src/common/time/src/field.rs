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

//! Datetime fields and their extraction from [TimeTz] values.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::precision::TimePrecision;
use crate::time_tz::{
    TimeTz, NANOS_PER_HOUR, NANOS_PER_MILLISECOND, NANOS_PER_MINUTE, NANOS_PER_SECOND,
};

/// Every datetime field known to the SQL layer, named by its upper case keyword.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    DayOfWeek,
    DayOfYear,
    YearOfWeek,
    Hour,
    Minute,
    Second,
    Millisecond,
    TimezoneHour,
    TimezoneMinute,
}

impl FieldKind {
    /// Returns the upper case name of the field, e.g. `TIMEZONE_HOUR`.
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    /// Returns the field as extractable from a `time with time zone`, or `None`
    /// if the field does not exist on a time-only value.
    pub fn time_tz_field(&self) -> Option<TimeTzField> {
        match self {
            FieldKind::Hour => Some(TimeTzField::Hour),
            FieldKind::Minute => Some(TimeTzField::Minute),
            FieldKind::Second => Some(TimeTzField::Second),
            FieldKind::Millisecond => Some(TimeTzField::Millisecond),
            FieldKind::TimezoneHour => Some(TimeTzField::TimezoneHour),
            FieldKind::TimezoneMinute => Some(TimeTzField::TimezoneMinute),
            FieldKind::Year
            | FieldKind::Quarter
            | FieldKind::Month
            | FieldKind::Week
            | FieldKind::Day
            | FieldKind::DayOfWeek
            | FieldKind::DayOfYear
            | FieldKind::YearOfWeek => None,
        }
    }
}

/// The fields a `time with time zone` value carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum TimeTzField {
    Hour,
    Minute,
    Second,
    Millisecond,
    TimezoneHour,
    TimezoneMinute,
}

impl From<TimeTzField> for FieldKind {
    fn from(field: TimeTzField) -> Self {
        match field {
            TimeTzField::Hour => FieldKind::Hour,
            TimeTzField::Minute => FieldKind::Minute,
            TimeTzField::Second => FieldKind::Second,
            TimeTzField::Millisecond => FieldKind::Millisecond,
            TimeTzField::TimezoneHour => FieldKind::TimezoneHour,
            TimeTzField::TimezoneMinute => FieldKind::TimezoneMinute,
        }
    }
}

/// Extracts `field` from `value`.
///
/// The declared precision of the operand only bounds how many fractional
/// digits of the value were significant, no field depends on it: MILLISECOND
/// always truncates the sub-second part down to whole milliseconds.
///
/// The offset fields share the sign of the whole offset, so `-00:35` yields
/// TIMEZONE_HOUR `0` and TIMEZONE_MINUTE `-35`.
pub fn extract(value: &TimeTz, _precision: TimePrecision, field: TimeTzField) -> i64 {
    let nanos = value.nanos_of_day();
    let offset = value.offset_minutes() as i64;

    match field {
        TimeTzField::Hour => nanos / NANOS_PER_HOUR % 24,
        TimeTzField::Minute => nanos / NANOS_PER_MINUTE % 60,
        TimeTzField::Second => nanos / NANOS_PER_SECOND % 60,
        TimeTzField::Millisecond => nanos % NANOS_PER_SECOND / NANOS_PER_MILLISECOND,
        TimeTzField::TimezoneHour => offset.signum() * (offset.abs() / 60),
        TimeTzField::TimezoneMinute => offset.signum() * (offset.abs() % 60),
    }
}

/// Extracts `field` from each value, `None` stays `None`.
pub fn extract_batch(
    values: &[Option<TimeTz>],
    precision: TimePrecision,
    field: TimeTzField,
) -> Vec<Option<i64>> {
    values
        .iter()
        .map(|v| v.as_ref().map(|v| extract(v, precision, field)))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    const FRACTIONS: [&str; 13] = [
        "",
        ".1",
        ".12",
        ".123",
        ".1234",
        ".12345",
        ".123456",
        ".1234567",
        ".12345678",
        ".123456789",
        ".1234567890",
        ".12345678901",
        ".123456789012",
    ];

    fn parse(literal: &str) -> (TimeTz, TimePrecision) {
        TimeTz::parse_literal(literal).unwrap()
    }

    #[test]
    fn test_field_names() {
        assert_eq!("TIMEZONE_HOUR", FieldKind::TimezoneHour.name());
        assert_eq!("DAY_OF_WEEK", FieldKind::DayOfWeek.to_string());
        assert_eq!(
            FieldKind::YearOfWeek,
            FieldKind::from_str("YEAR_OF_WEEK").unwrap()
        );
    }

    #[test]
    fn test_time_tz_fields() {
        let legal = FieldKind::iter()
            .filter(|f| f.time_tz_field().is_some())
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                FieldKind::Hour,
                FieldKind::Minute,
                FieldKind::Second,
                FieldKind::Millisecond,
                FieldKind::TimezoneHour,
                FieldKind::TimezoneMinute,
            ],
            legal
        );

        for field in TimeTzField::iter() {
            assert_eq!(Some(field), FieldKind::from(field).time_tz_field());
        }
    }

    #[test]
    fn test_clock_fields_ignore_precision() {
        for fraction in FRACTIONS {
            let (value, precision) = parse(&format!("12:34:56{fraction}+08:35"));
            assert_eq!(12, extract(&value, precision, TimeTzField::Hour));
            assert_eq!(34, extract(&value, precision, TimeTzField::Minute));
            assert_eq!(56, extract(&value, precision, TimeTzField::Second));

            // The declared precision of the column does not matter either.
            for p in TimePrecision::all() {
                assert_eq!(12, extract(&value, p, TimeTzField::Hour));
            }
        }
    }

    #[test]
    fn test_millisecond_truncates() {
        let expected = [0, 100, 120, 123, 123, 123, 123, 123, 123, 123, 123, 123, 123];
        for (fraction, expected) in FRACTIONS.iter().zip(expected) {
            let (value, precision) = parse(&format!("12:34:56{fraction}+08:35"));
            assert_eq!(
                expected,
                extract(&value, precision, TimeTzField::Millisecond),
                "{fraction}"
            );
        }

        let (value, precision) = parse("00:00:00.9999+00:00");
        assert_eq!(999, extract(&value, precision, TimeTzField::Millisecond));
    }

    #[test]
    fn test_offset_sign() {
        let cases = [
            ("+08:35", 8, 35),
            ("-08:35", -8, -35),
            ("-00:35", 0, -35),
            ("+00:00", 0, 0),
            ("-00:00", 0, 0),
            ("-14:00", -14, 0),
        ];
        for (offset, hour, minute) in cases {
            for fraction in FRACTIONS {
                let (value, precision) = parse(&format!("12:34:56{fraction}{offset}"));
                assert_eq!(
                    hour,
                    extract(&value, precision, TimeTzField::TimezoneHour),
                    "{offset}"
                );
                assert_eq!(
                    minute,
                    extract(&value, precision, TimeTzField::TimezoneMinute),
                    "{offset}"
                );
            }
        }
    }

    #[test]
    fn test_extract_batch() {
        let values = vec![
            Some(TimeTz::from_str("23:59:59.999999999+01:00").unwrap()),
            None,
            Some(TimeTz::from_str("00:00:00-05:30").unwrap()),
        ];
        let precision = TimePrecision::NANOSECOND;
        assert_eq!(
            vec![Some(23), None, Some(0)],
            extract_batch(&values, precision, TimeTzField::Hour)
        );
        assert_eq!(
            vec![Some(999), None, Some(0)],
            extract_batch(&values, precision, TimeTzField::Millisecond)
        );
        assert_eq!(
            vec![Some(0), None, Some(-30)],
            extract_batch(&values, precision, TimeTzField::TimezoneMinute)
        );
        assert!(extract_batch(&[], precision, TimeTzField::Hour).is_empty());
    }
}
