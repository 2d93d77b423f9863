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

//! `EXTRACT` and the field functions over `time(p) with time zone`, driven
//! through the same entry points a SQL frontend uses.

use common_error::ext::ErrorExt;
use common_error::status_code::StatusCode;
use common_function::column::{Column, TimeTzColumn};
use common_function::error::{Error, Result};
use common_function::extract::ExtractExpr;
use common_function::position::Position;
use common_function::FUNCTION_REGISTRY;
use common_time::{TimePrecision, TimeTz};

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

/// A one row operand, written as SQL, together with its evaluated column.
struct Operand {
    sql: String,
    column: Column,
}

/// `TIME '<literal>'`, typed with as many fractional digits as written.
fn time_literal(literal: &str) -> Operand {
    let (value, precision) = TimeTz::parse_literal(literal).unwrap();
    Operand {
        sql: format!("TIME '{literal}'"),
        column: TimeTzColumn::new(precision, vec![Some(value)]).into(),
    }
}

/// `CAST(NULL AS TIME(<p>) WITH TIME ZONE)`
fn null_of(precision: TimePrecision) -> Operand {
    Operand {
        sql: format!("CAST(NULL AS TIME({precision}) WITH TIME ZONE)"),
        column: TimeTzColumn::new_null(precision, 1).into(),
    }
}

fn column_of(sql: &str, needle: &str) -> u32 {
    sql.find(needle).unwrap() as u32 + 1
}

fn single(column: Column) -> Option<i64> {
    let values = column.as_int64().unwrap();
    assert_eq!(1, values.len());
    values[0]
}

/// Analyzes and evaluates `SELECT EXTRACT(<field> FROM <operand>)`.
fn extract(field: &str, operand: &Operand) -> Result<Option<i64>> {
    let sql = format!("SELECT EXTRACT({field} FROM {})", operand.sql);
    let keyword = Position::new(1, column_of(&sql, "EXTRACT"));
    let operand_position = Position::new(1, column_of(&sql, &operand.sql));

    let expr = ExtractExpr::try_new(
        field,
        keyword,
        operand.column.data_type(),
        operand_position,
    )?;
    expr.evaluate(&operand.column).map(single)
}

/// Evaluates `SELECT <function>(<operand>)`.
fn call(function: &str, operand: &Operand) -> Option<i64> {
    let f = FUNCTION_REGISTRY.get_function(function).unwrap();
    single(f.eval(std::slice::from_ref(&operand.column)).unwrap())
}

fn assert_field(field: &str, offset: &str, expected: i64) {
    for fraction in FRACTIONS {
        let operand = time_literal(&format!("12:34:56{fraction}{offset}"));
        assert_eq!(
            Some(expected),
            extract(field, &operand).unwrap(),
            "EXTRACT({field} FROM {})",
            operand.sql
        );
        assert_eq!(
            Some(expected),
            call(&field.to_ascii_lowercase(), &operand),
            "{field}({})",
            operand.sql
        );
    }
}

fn assert_calendar_field_rejected(field: &str, column: u32) {
    for precision in TimePrecision::all() {
        let err = extract(field, &null_of(precision)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFieldForType { .. }));
        assert_eq!(StatusCode::InvalidArguments, err.status_code());
        assert_eq!(
            format!("line 1:{column}: Cannot extract {field} from time({precision}) with time zone"),
            err.to_string()
        );
    }
}

#[test]
fn test_year() {
    assert_calendar_field_rejected("YEAR", 26);
}

#[test]
fn test_month() {
    assert_calendar_field_rejected("MONTH", 27);
}

#[test]
fn test_day() {
    assert_calendar_field_rejected("DAY", 25);
}

#[test]
fn test_hour() {
    assert_field("HOUR", "+08:35", 12);
}

#[test]
fn test_minute() {
    assert_field("MINUTE", "+08:35", 34);
}

#[test]
fn test_second() {
    assert_field("SECOND", "+08:35", 56);
}

#[test]
fn test_millisecond() {
    let err = extract("MILLISECOND", &time_literal("12:34:56+08:35")).unwrap_err();
    assert!(matches!(err, Error::UnknownExtractField { .. }));
    assert_eq!(StatusCode::InvalidSyntax, err.status_code());
    assert_eq!("line 1:8: Invalid EXTRACT field: MILLISECOND", err.to_string());

    // The grammar rejects it before the operand type is looked at.
    let err = extract("MILLISECOND", &null_of(TimePrecision::PICOSECOND)).unwrap_err();
    assert_eq!("line 1:8: Invalid EXTRACT field: MILLISECOND", err.to_string());

    let expected = [0, 100, 120, 123, 123, 123, 123, 123, 123, 123, 123, 123, 123];
    for (fraction, expected) in FRACTIONS.iter().zip(expected) {
        let operand = time_literal(&format!("12:34:56{fraction}+08:35"));
        assert_eq!(Some(expected), call("millisecond", &operand), "{}", operand.sql);
    }
}

#[test]
fn test_timezone_hour() {
    assert_field("TIMEZONE_HOUR", "+08:35", 8);
    assert_field("TIMEZONE_HOUR", "-08:35", -8);
    assert_field("TIMEZONE_HOUR", "-00:35", 0);
}

#[test]
fn test_timezone_minute() {
    assert_field("TIMEZONE_MINUTE", "+08:35", 35);
    assert_field("TIMEZONE_MINUTE", "-08:35", -35);
    assert_field("TIMEZONE_MINUTE", "-00:35", -35);
}

#[test]
fn test_null_operand() {
    let operand = null_of(TimePrecision::MILLISECOND);
    assert_eq!(None, extract("HOUR", &operand).unwrap());
    assert_eq!(None, call("timezone_minute", &operand));
}

#[test]
fn test_unknown_token() {
    let err = extract("fortnight", &time_literal("12:34:56+08:35")).unwrap_err();
    assert_eq!("line 1:8: Invalid EXTRACT field: FORTNIGHT", err.to_string());
}

#[test]
fn test_keyword_aliases_are_calendar_fields() {
    let err = extract("DOW", &null_of(TimePrecision::SECOND)).unwrap_err();
    assert_eq!(
        "line 1:25: Cannot extract DOW from time(0) with time zone",
        err.to_string()
    );

    assert_calendar_field_rejected("DAY_OF_MONTH", 34);
    assert_calendar_field_rejected("DOY", 25);
    assert_calendar_field_rejected("YOW", 25);
}
