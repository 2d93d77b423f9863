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

use crate::data_type::ConcreteDataType;
use crate::position::Position;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// The field exists in the grammar but not on values of `data_type`.
    #[snafu(display("{}: Cannot extract {} from {}", position, field, data_type))]
    UnsupportedFieldForType {
        field: String,
        data_type: ConcreteDataType,
        position: Position,
        #[snafu(implicit)]
        location: Location,
    },

    /// The token is not a field keyword of `EXTRACT` at all.
    #[snafu(display("{}: Invalid EXTRACT field: {}", position, token))]
    UnknownExtractField {
        token: String,
        position: Position,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Unsupported input datatypes {:?} in function {}", datatypes, function))]
    UnsupportedInputDataType {
        function: String,
        datatypes: Vec<ConcreteDataType>,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Invalid function args: {}", err_msg))]
    InvalidFuncArgs {
        err_msg: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Function not found: {}", name))]
    FunctionNotFound {
        name: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Function alias {} conflicts with an existing function", alias))]
    AliasConflict {
        alias: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Invalid time with time zone value"))]
    InvalidTimeTz {
        source: common_time::error::Error,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::UnknownExtractField { .. } => StatusCode::InvalidSyntax,
            Error::UnsupportedFieldForType { .. }
            | Error::UnsupportedInputDataType { .. }
            | Error::InvalidFuncArgs { .. }
            | Error::AliasConflict { .. } => StatusCode::InvalidArguments,
            Error::FunctionNotFound { .. } => StatusCode::Unsupported,
            Error::InvalidTimeTz { source, .. } => source.status_code(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub type Result<T> = std::result::Result<T, Error>;
