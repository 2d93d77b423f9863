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

use crate::column::Column;
use crate::data_type::ConcreteDataType;
use crate::error::Result;

/// Argument types a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    /// A single `time(p) with time zone` argument of any precision.
    AnyTimeTz,
}

impl Signature {
    pub fn matches(&self, input_types: &[ConcreteDataType]) -> bool {
        match self {
            Signature::AnyTimeTz => matches!(input_types, [t] if t.is_time_tz()),
        }
    }
}

/// Scalar function trait.
pub trait Function: fmt::Display + Sync + Send {
    /// Returns the name of the function, should be unique.
    fn name(&self) -> &str;

    /// The returned data type of function execution.
    fn return_type(&self, input_types: &[ConcreteDataType]) -> Result<ConcreteDataType>;

    /// The signature of function.
    fn signature(&self) -> Signature;

    /// Evaluate the function over whole columns, one output row per input row.
    fn eval(&self, columns: &[Column]) -> Result<Column>;
}

pub type FunctionRef = Arc<dyn Function>;
