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

//! Nullable columns passed into and out of functions.

use common_time::{TimePrecision, TimeTz};

use crate::data_type::ConcreteDataType;

/// A column of `time(p) with time zone` values sharing one declared precision.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeTzColumn {
    precision: TimePrecision,
    values: Vec<Option<TimeTz>>,
}

impl TimeTzColumn {
    pub fn new(precision: TimePrecision, values: Vec<Option<TimeTz>>) -> Self {
        Self { precision, values }
    }

    /// A column of `len` nulls, e.g. `CAST(NULL AS TIME(p) WITH TIME ZONE)`.
    pub fn new_null(precision: TimePrecision, len: usize) -> Self {
        Self::new(precision, vec![None; len])
    }

    pub fn precision(&self) -> TimePrecision {
        self.precision
    }

    pub fn values(&self) -> &[Option<TimeTz>] {
        &self.values
    }

    pub fn data_type(&self) -> ConcreteDataType {
        ConcreteDataType::time_tz_datatype(self.precision)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int64(Vec<Option<i64>>),
    TimeTz(TimeTzColumn),
}

impl Column {
    pub fn data_type(&self) -> ConcreteDataType {
        match self {
            Column::Int64(_) => ConcreteDataType::int64_datatype(),
            Column::TimeTz(c) => c.data_type(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Int64(v) => v.len(),
            Column::TimeTz(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_int64(&self) -> Option<&[Option<i64>]> {
        match self {
            Column::Int64(v) => Some(v),
            Column::TimeTz(_) => None,
        }
    }
}

impl From<TimeTzColumn> for Column {
    fn from(c: TimeTzColumn) -> Self {
        Column::TimeTz(c)
    }
}

impl From<Vec<Option<i64>>> for Column {
    fn from(v: Vec<Option<i64>>) -> Self {
        Column::Int64(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_types() {
        let column: Column = TimeTzColumn::new_null(TimePrecision::MILLISECOND, 2).into();
        assert_eq!(2, column.len());
        assert_eq!(
            ConcreteDataType::time_tz_datatype(TimePrecision::MILLISECOND),
            column.data_type()
        );
        assert!(column.as_int64().is_none());

        let column: Column = vec![Some(1), None].into();
        assert_eq!(ConcreteDataType::int64_datatype(), column.data_type());
        assert_eq!(Some(&[Some(1), None][..]), column.as_int64());
        assert!(!column.is_empty());
    }
}
