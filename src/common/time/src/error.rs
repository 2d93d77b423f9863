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

use std::any::Any;

use common_error::ext::ErrorExt;
use common_error::status_code::StatusCode;
use snafu::{Location, Snafu};

use crate::precision::MAX_PRECISION;
use crate::time_tz::{MAX_OFFSET_MINUTES, NANOS_PER_DAY};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display(
        "Invalid time zone offset: {} minutes, expect a value in [-{}, {}]",
        offset_minutes,
        MAX_OFFSET_MINUTES,
        MAX_OFFSET_MINUTES
    ))]
    InvalidOffset {
        offset_minutes: i64,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display(
        "Invalid time of day: {} nanoseconds, expect a value in [0, {})",
        nanos,
        NANOS_PER_DAY
    ))]
    InvalidTime {
        nanos: i64,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display(
        "Invalid time precision: {}, expect a value in [0, {}]",
        precision,
        MAX_PRECISION
    ))]
    InvalidPrecision {
        precision: i64,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Failed to parse string to time with time zone, raw: {}", raw))]
    ParseTimeTz {
        raw: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidOffset { .. }
            | Error::InvalidTime { .. }
            | Error::InvalidPrecision { .. }
            | Error::ParseTimeTz { .. } => StatusCode::InvalidArguments,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub type Result<T> = std::result::Result<T, Error>;
