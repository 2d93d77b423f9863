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

//! functions registry
use std::collections::HashMap;
use std::sync::Arc;

use common_telemetry::debug;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use snafu::{ensure, OptionExt};

use crate::error::{AliasConflictSnafu, FunctionNotFoundSnafu, Result};
use crate::function::FunctionRef;
use crate::options::FunctionOptions;
use crate::scalars::timetz::TimeTzFunction;

#[derive(Default)]
pub struct FunctionRegistry {
    functions: RwLock<HashMap<String, FunctionRef>>,
    aliases: RwLock<HashMap<String, String>>,
}

impl FunctionRegistry {
    /// Creates a registry with the builtin functions and the aliases in `opts`.
    pub fn try_new(opts: &FunctionOptions) -> Result<Self> {
        let registry = Self::default();
        TimeTzFunction::register(&registry);
        for (alias, target) in &opts.aliases {
            registry.register_alias(alias, target)?;
        }
        Ok(registry)
    }

    pub fn register(&self, func: FunctionRef) {
        let name = func.name().to_ascii_lowercase();
        debug!("Registering function: {}", name);
        let _ = self.functions.write().insert(name, func);
    }

    /// Makes `target` also callable as `alias`. An alias never shadows a
    /// registered function name.
    pub fn register_alias(&self, alias: &str, target: &str) -> Result<()> {
        let alias = alias.to_ascii_lowercase();
        let target = target.to_ascii_lowercase();
        let functions = self.functions.read();
        ensure!(
            !functions.contains_key(&alias),
            AliasConflictSnafu { alias: &alias }
        );
        let _ = functions
            .get(&target)
            .context(FunctionNotFoundSnafu { name: &target })?;

        debug!("Registering function alias: {} -> {}", alias, target);
        let _ = self.aliases.write().insert(alias, target);
        Ok(())
    }

    /// Looks up a function by name, then by alias, ignoring ASCII case.
    pub fn get_function(&self, name: &str) -> Option<FunctionRef> {
        let name = name.to_ascii_lowercase();
        let functions = self.functions.read();
        if let Some(func) = functions.get(&name) {
            return Some(func.clone());
        }
        let target = self.aliases.read().get(&name).cloned()?;
        functions.get(&target).cloned()
    }

    pub fn functions(&self) -> Vec<FunctionRef> {
        self.functions.read().values().cloned().collect()
    }
}

lazy_static! {
    pub static ref FUNCTION_REGISTRY: Arc<FunctionRegistry> = {
        let function_registry = FunctionRegistry::default();

        TimeTzFunction::register(&function_registry);

        Arc::new(function_registry)
    };
}
