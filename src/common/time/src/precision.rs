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

use serde::{Deserialize, Serialize};
use snafu::ensure;

use crate::error::{Error, InvalidPrecisionSnafu, Result};

/// Maximum number of fractional second digits a time type may declare.
pub const MAX_PRECISION: u8 = 12;

/// Number of fractional second digits a time value keeps internally.
pub const NANOSECOND_DIGITS: u8 = 9;

/// The declared precision of a time type, i.e. the number of significant
/// fractional second digits, in `[0, 12]`.
///
/// This is a property of the type, not of the value: it bounds how many
/// digits were significant when the value was produced and how many are
/// rendered, but it never changes how the value is stored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct TimePrecision(u8);

impl TimePrecision {
    pub const SECOND: TimePrecision = TimePrecision(0);
    pub const MILLISECOND: TimePrecision = TimePrecision(3);
    pub const MICROSECOND: TimePrecision = TimePrecision(6);
    pub const NANOSECOND: TimePrecision = TimePrecision(NANOSECOND_DIGITS);
    pub const PICOSECOND: TimePrecision = TimePrecision(MAX_PRECISION);

    /// Creates a precision, failing if `precision` is outside `[0, 12]`.
    pub fn try_new(precision: i64) -> Result<Self> {
        ensure!(
            (0..=MAX_PRECISION as i64).contains(&precision),
            InvalidPrecisionSnafu { precision }
        );
        Ok(Self(precision as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Iterates over every legal precision, from 0 to 12.
    pub fn all() -> impl Iterator<Item = TimePrecision> {
        (0..=MAX_PRECISION).map(TimePrecision)
    }
}

impl TryFrom<u8> for TimePrecision {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::try_new(value as i64)
    }
}

impl From<TimePrecision> for u8 {
    fn from(p: TimePrecision) -> Self {
        p.0
    }
}

impl Display for TimePrecision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
