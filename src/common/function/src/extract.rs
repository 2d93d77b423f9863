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

//! Resolution of datetime fields requested by `EXTRACT(<field> FROM <expr>)`
//! or by a field function such as `hour(<expr>)`.
//!
//! A field goes through two checks. The grammar check rejects tokens that are
//! not field keywords at all and reports them at the `EXTRACT` keyword. The
//! type check rejects fields that exist but not on the operand's type and
//! reports them at the operand. The two failures use distinct errors.

use std::str::FromStr;

use common_telemetry::debug;
use common_time::{extract, extract_batch, FieldKind, TimePrecision, TimeTz, TimeTzField};
use snafu::OptionExt;
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::column::Column;
use crate::data_type::ConcreteDataType;
use crate::error::{
    FunctionNotFoundSnafu, Result, UnknownExtractFieldSnafu, UnsupportedFieldForTypeSnafu,
    UnsupportedInputDataTypeSnafu,
};
use crate::position::Position;

/// The field keywords accepted inside `EXTRACT(...)`.
///
/// MILLISECOND is not a keyword, it is only reachable through `millisecond()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum ExtractKeyword {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    DayOfMonth,
    DayOfWeek,
    Dow,
    DayOfYear,
    Doy,
    YearOfWeek,
    Yow,
    Hour,
    Minute,
    Second,
    TimezoneMinute,
    TimezoneHour,
}

impl ExtractKeyword {
    /// Parses the field token of an `EXTRACT` located at `position`.
    pub fn parse(token: &str, position: Position) -> Result<Self> {
        ExtractKeyword::from_str(token)
            .ok()
            .with_context(|| UnknownExtractFieldSnafu {
                token: token.to_ascii_uppercase(),
                position,
            })
    }

    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    pub fn field_kind(&self) -> FieldKind {
        match self {
            ExtractKeyword::Year => FieldKind::Year,
            ExtractKeyword::Quarter => FieldKind::Quarter,
            ExtractKeyword::Month => FieldKind::Month,
            ExtractKeyword::Week => FieldKind::Week,
            ExtractKeyword::Day | ExtractKeyword::DayOfMonth => FieldKind::Day,
            ExtractKeyword::DayOfWeek | ExtractKeyword::Dow => FieldKind::DayOfWeek,
            ExtractKeyword::DayOfYear | ExtractKeyword::Doy => FieldKind::DayOfYear,
            ExtractKeyword::YearOfWeek | ExtractKeyword::Yow => FieldKind::YearOfWeek,
            ExtractKeyword::Hour => FieldKind::Hour,
            ExtractKeyword::Minute => FieldKind::Minute,
            ExtractKeyword::Second => FieldKind::Second,
            ExtractKeyword::TimezoneMinute => FieldKind::TimezoneMinute,
            ExtractKeyword::TimezoneHour => FieldKind::TimezoneHour,
        }
    }
}

/// How a field was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSyntax {
    /// `EXTRACT(<field> FROM <expr>)`
    Keyword,
    /// `<field>(<expr>)`
    Function,
}

/// Maps a field function name such as `timezone_hour` to its field.
pub fn field_of_function(name: &str) -> Option<FieldKind> {
    FieldKind::from_str(&name.to_ascii_uppercase()).ok()
}

/// Resolves `identifier` to a field according to the syntax it was written in.
///
/// Also returns the upper case name the field was requested by, which differs
/// from the field's own name for alias keywords like `DOW`.
pub fn resolve_field(
    identifier: &str,
    syntax: FieldSyntax,
    position: Position,
) -> Result<(FieldKind, &'static str)> {
    match syntax {
        FieldSyntax::Keyword => {
            ExtractKeyword::parse(identifier, position).map(|k| (k.field_kind(), k.name()))
        }
        FieldSyntax::Function => field_of_function(identifier)
            .map(|f| (f, f.name()))
            .context(FunctionNotFoundSnafu { name: identifier }),
    }
}

/// Checks that `field` exists on values of `data_type`, returning the field
/// to extract and the declared precision of the operand. `name` is how the
/// field was spelled in the query and is what a rejection reports.
pub fn check_field(
    field: FieldKind,
    name: &str,
    data_type: &ConcreteDataType,
    position: Position,
) -> Result<(TimeTzField, TimePrecision)> {
    let resolved = match data_type {
        ConcreteDataType::TimeTz(precision) => field.time_tz_field().map(|f| (f, *precision)),
        ConcreteDataType::Int64 => None,
    };

    resolved.with_context(|| {
        debug!(
            "Field {} ({}) is not available on {}, position: {}",
            name, field, data_type, position
        );
        UnsupportedFieldForTypeSnafu {
            field: name,
            data_type: *data_type,
            position,
        }
    })
}

/// Resolves `identifier`, checks it against `data_type` and extracts it from
/// `value`. A null value yields `None`, but the field is still checked.
pub fn resolve_and_extract(
    identifier: &str,
    syntax: FieldSyntax,
    data_type: &ConcreteDataType,
    value: Option<&TimeTz>,
    position: Position,
) -> Result<Option<i64>> {
    let (field, name) = resolve_field(identifier, syntax, position)?;
    let (field, precision) = check_field(field, name, data_type, position)?;
    Ok(value.map(|v| extract(v, precision, field)))
}

/// An analyzed `EXTRACT(<field> FROM <operand>)` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractExpr {
    keyword: ExtractKeyword,
    field: TimeTzField,
    operand_type: ConcreteDataType,
}

impl ExtractExpr {
    /// Analyzes an `EXTRACT` whose keyword starts at `keyword_position` and
    /// whose operand of type `operand_type` starts at `operand_position`.
    pub fn try_new(
        token: &str,
        keyword_position: Position,
        operand_type: ConcreteDataType,
        operand_position: Position,
    ) -> Result<Self> {
        let keyword = ExtractKeyword::parse(token, keyword_position)?;
        let (field, _) = check_field(
            keyword.field_kind(),
            keyword.name(),
            &operand_type,
            operand_position,
        )?;
        Ok(Self {
            keyword,
            field,
            operand_type,
        })
    }

    pub fn keyword(&self) -> ExtractKeyword {
        self.keyword
    }

    pub fn field(&self) -> TimeTzField {
        self.field
    }

    pub fn return_type(&self) -> ConcreteDataType {
        ConcreteDataType::int64_datatype()
    }

    /// Evaluates the expression over an operand column.
    pub fn evaluate(&self, operand: &Column) -> Result<Column> {
        match operand {
            Column::TimeTz(c) if c.data_type() == self.operand_type => Ok(Column::Int64(
                extract_batch(c.values(), c.precision(), self.field),
            )),
            _ => UnsupportedInputDataTypeSnafu {
                function: "extract",
                datatypes: vec![operand.data_type()],
            }
            .fail(),
        }
    }
}
