//! Task descriptor: the two shapes a unit of work can take.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Parameters handed to the dispatched task.
///
/// Either an ordered sequence of strings or a name-to-value mapping; the
/// remote session's argument context accepts both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskParameters {
    Positional(Vec<String>),
    Named(BTreeMap<String, String>),
}

impl TaskParameters {
    pub fn is_empty(&self) -> bool {
        match self {
            TaskParameters::Positional(values) => values.is_empty(),
            TaskParameters::Named(values) => values.is_empty(),
        }
    }

    /// Visit every parameter value mutably (names of named parameters are
    /// left alone; only values can reference artifacts).
    pub fn values_mut(&mut self) -> Box<dyn Iterator<Item = &mut String> + Send + '_> {
        match self {
            TaskParameters::Positional(values) => Box::new(values.iter_mut()),
            TaskParameters::Named(values) => Box::new(values.values_mut()),
        }
    }
}

impl Default for TaskParameters {
    fn default() -> Self {
        TaskParameters::Positional(Vec::new())
    }
}

/// What to dispatch once the environment is prepared.
///
/// A closed union: exactly one branch is active per run, and dispatch
/// matches exhaustively, so "neither shape matched" cannot silently no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskDescriptor {
    /// Execute a standalone script file on the remote session.
    Script {
        file: PathBuf,
        #[serde(default)]
        parameters: TaskParameters,
    },

    /// Execute a named, pre-registered entry point of an installed package.
    EntryPoint {
        package_name: String,
        entry_point: String,
        #[serde(default)]
        parameters: TaskParameters,
    },
}

impl TaskDescriptor {
    pub fn parameters(&self) -> &TaskParameters {
        match self {
            TaskDescriptor::Script { parameters, .. } => parameters,
            TaskDescriptor::EntryPoint { parameters, .. } => parameters,
        }
    }

    pub fn parameters_mut(&mut self) -> &mut TaskParameters {
        match self {
            TaskDescriptor::Script { parameters, .. } => parameters,
            TaskDescriptor::EntryPoint { parameters, .. } => parameters,
        }
    }
}
