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

use std::fmt;
use std::sync::Arc;

use common_time::{extract_batch, FieldKind, TimeTzField};
use snafu::ensure;
use strum::IntoEnumIterator;

use crate::column::Column;
use crate::data_type::ConcreteDataType;
use crate::error::{InvalidFuncArgsSnafu, Result, UnsupportedInputDataTypeSnafu};
use crate::function::{Function, Signature};
use crate::function_registry::FunctionRegistry;

/// Extracts one field of a `time(p) with time zone` argument as `bigint`,
/// e.g. `hour(t)` or `timezone_minute(t)`.
#[derive(Clone, Debug)]
pub struct TimeTzFieldFunction {
    field: TimeTzField,
    name: String,
}

impl TimeTzFieldFunction {
    pub fn new(field: TimeTzField) -> Self {
        let name = FieldKind::from(field).name().to_ascii_lowercase();
        Self { field, name }
    }

    pub fn field(&self) -> TimeTzField {
        self.field
    }
}

impl Function for TimeTzFieldFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn return_type(&self, input_types: &[ConcreteDataType]) -> Result<ConcreteDataType> {
        ensure!(
            self.signature().matches(input_types),
            UnsupportedInputDataTypeSnafu {
                function: self.name(),
                datatypes: input_types.to_vec(),
            }
        );
        Ok(ConcreteDataType::int64_datatype())
    }

    fn signature(&self) -> Signature {
        Signature::AnyTimeTz
    }

    fn eval(&self, columns: &[Column]) -> Result<Column> {
        ensure!(
            columns.len() == 1,
            InvalidFuncArgsSnafu {
                err_msg: format!(
                    "The length of the args is not correct, expect exactly one, have: {}",
                    columns.len()
                ),
            }
        );

        match &columns[0] {
            Column::TimeTz(c) => Ok(Column::Int64(extract_batch(
                c.values(),
                c.precision(),
                self.field,
            ))),
            other => UnsupportedInputDataTypeSnafu {
                function: self.name(),
                datatypes: vec![other.data_type()],
            }
            .fail(),
        }
    }
}

impl fmt::Display for TimeTzFieldFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name.to_ascii_uppercase())
    }
}

pub(crate) struct TimeTzFunction;

impl TimeTzFunction {
    pub fn register(registry: &FunctionRegistry) {
        for field in TimeTzField::iter() {
            registry.register(Arc::new(TimeTzFieldFunction::new(field)));
        }
    }
}

#[cfg(test)]
mod tests {
    use common_time::{TimePrecision, TimeTz};

    use super::*;
    use crate::column::TimeTzColumn;
    use crate::error::Error;

    fn column(literals: &[Option<&str>]) -> Column {
        let values = literals
            .iter()
            .map(|l| l.map(|l| l.parse::<TimeTz>().unwrap()))
            .collect();
        TimeTzColumn::new(TimePrecision::PICOSECOND, values).into()
    }

    #[test]
    fn test_function_names() {
        let names = TimeTzField::iter()
            .map(|f| TimeTzFieldFunction::new(f).name().to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                "hour",
                "minute",
                "second",
                "millisecond",
                "timezone_hour",
                "timezone_minute"
            ],
            names
        );
        assert_eq!(
            "TIMEZONE_HOUR",
            TimeTzFieldFunction::new(TimeTzField::TimezoneHour).to_string()
        );
    }

    #[test]
    fn test_eval() {
        let input = column(&[
            Some("12:34:56.123456789012+08:35"),
            None,
            Some("00:00:01-00:35"),
        ]);
        let cases = [
            (TimeTzField::Hour, vec![Some(12), None, Some(0)]),
            (TimeTzField::Minute, vec![Some(34), None, Some(0)]),
            (TimeTzField::Second, vec![Some(56), None, Some(1)]),
            (TimeTzField::Millisecond, vec![Some(123), None, Some(0)]),
            (TimeTzField::TimezoneHour, vec![Some(8), None, Some(0)]),
            (TimeTzField::TimezoneMinute, vec![Some(35), None, Some(-35)]),
        ];
        for (field, expected) in cases {
            let f = TimeTzFieldFunction::new(field);
            assert_eq!(
                Column::Int64(expected),
                f.eval(std::slice::from_ref(&input)).unwrap()
            );
        }
    }

    #[test]
    fn test_return_type_and_signature() {
        let f = TimeTzFieldFunction::new(TimeTzField::Second);
        assert_eq!(Signature::AnyTimeTz, f.signature());
        for precision in TimePrecision::all() {
            assert_eq!(
                ConcreteDataType::int64_datatype(),
                f.return_type(&[ConcreteDataType::time_tz_datatype(precision)])
                    .unwrap()
            );
        }
        assert!(matches!(
            f.return_type(&[ConcreteDataType::int64_datatype()]).unwrap_err(),
            Error::UnsupportedInputDataType { .. }
        ));
    }

    #[test]
    fn test_invalid_args() {
        let f = TimeTzFieldFunction::new(TimeTzField::Hour);
        assert!(matches!(
            f.eval(&[]).unwrap_err(),
            Error::InvalidFuncArgs { .. }
        ));

        let input = column(&[None]);
        assert!(matches!(
            f.eval(&[input.clone(), input]).unwrap_err(),
            Error::InvalidFuncArgs { .. }
        ));

        let err = f.eval(&[Column::Int64(vec![Some(1)])]).unwrap_err();
        assert_eq!(
            "Unsupported input datatypes [Int64] in function hour",
            err.to_string()
        );
    }
}
