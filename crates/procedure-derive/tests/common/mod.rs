// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering}
};

use procedure_derive::{CallPrimitive, ParamMap, ParameterDeclaration, ProcedureCall, Row};

/// Error reported by [`FakeDatabase`] when told to fail.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("database unavailable: {0}")]
pub struct DatabaseError(pub String);

/// What one invocation looked like from the database side.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub call_string: String,
    pub name:        String,
    pub schema:      Option<String>,
    pub parameters:  Vec<ParameterDeclaration>,
    pub inputs:      ParamMap
}

/// In-memory call primitive returning canned values.
///
/// `rows` are mapped through every result-set binding of the call, so each
/// declared result set receives the same raw rows.
#[derive(Default)]
pub struct FakeDatabase {
    pub values: ParamMap,
    pub rows:   Vec<Row>,
    pub echo:   bool,
    pub fail:   Option<String>,
    pub calls:  AtomicUsize,
    pub recorded: Mutex<Vec<RecordedCall>>
}

impl FakeDatabase {
    pub fn returning(values: ParamMap) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.recorded.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl CallPrimitive for FakeDatabase {
    type Error = DatabaseError;

    fn invoke(&self, call: ProcedureCall<'_>) -> Result<ParamMap, DatabaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            call = %call.call_string(),
            inputs = call.inputs().len(),
            "fake database invoked"
        );
        if let Ok(mut recorded) = self.recorded.lock() {
            recorded.push(RecordedCall {
                call_string: call.call_string(),
                name:        call.name().to_owned(),
                schema:      call.schema().map(str::to_owned),
                parameters:  call.parameters().to_vec(),
                inputs:      call.inputs().clone()
            });
        }
        if let Some(reason) = &self.fail {
            return Err(DatabaseError(reason.clone()));
        }

        let mut result = if self.echo {
            call.inputs().clone()
        } else {
            ParamMap::new()
        };
        result.extend(self.values.clone());
        for binding in call.result_sets() {
            let rows = binding
                .map_rows(self.rows.iter().cloned())
                .map_err(|e| DatabaseError(e.to_string()))?;
            result.insert(binding.name().to_owned(), rows);
        }
        Ok(result)
    }
}

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
