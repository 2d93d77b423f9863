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

use std::fmt::{Display, Formatter};

use common_time::TimePrecision;
use serde::{Deserialize, Serialize};

/// SQL types seen by the time with time zone functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcreteDataType {
    Int64,
    TimeTz(TimePrecision),
}

impl ConcreteDataType {
    pub fn int64_datatype() -> Self {
        ConcreteDataType::Int64
    }

    pub fn time_tz_datatype(precision: TimePrecision) -> Self {
        ConcreteDataType::TimeTz(precision)
    }

    pub fn is_time_tz(&self) -> bool {
        matches!(self, ConcreteDataType::TimeTz(_))
    }
}

impl Display for ConcreteDataType {
    /// Renders the type the way SQL spells it, e.g. `time(3) with time zone`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConcreteDataType::Int64 => write!(f, "bigint"),
            ConcreteDataType::TimeTz(precision) => write!(f, "time({precision}) with time zone"),
        }
    }
}
