// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Call plan registry.
//!
//! [`PlanCache`] memoizes one [`CallPlan`] per input type. It is constructed
//! explicitly and shared through `Arc`, so tests can use isolated registries.
//!
//! # Concurrency
//!
//! Each key maps to its own [`OnceCell`]. Concurrent first callers for the
//! same input type wait on that cell and exactly one of them runs the build;
//! the others observe the finished plan, never a partial one. Builds of
//! different input types do not wait on each other. A failed build leaves the
//! cell empty, so the next call tries again.
//!
//! # Keying
//!
//! Plans are keyed by the input type alone. An input type is bound to the
//! output type of its first successful resolution; resolving it later with a
//! different output type fails with
//! [`ConfigurationError::OutputTypeMismatch`] instead of reusing a plan whose
//! OUT parameters and result sets belong to another type.

use std::{
    any::TypeId,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering}
    }
};

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use tracing::{trace, warn};

use crate::{ProcedureInput, ProcedureOutput, error::ConfigurationError, plan::CallPlan};

type Slot = Arc<OnceCell<Arc<CallPlan>>>;

/// Append-only registry of call plans keyed by input type.
#[derive(Debug, Default)]
pub struct PlanCache {
    plans:  DashMap<TypeId, Slot>,
    builds: AtomicUsize
}

impl PlanCache {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the plan for input type `I`, building it on first use.
    ///
    /// # Errors
    ///
    /// - Whatever [`CallPlan::build`] reports on first use
    /// - [`ConfigurationError::OutputTypeMismatch`] if `I` was planned for
    ///   another output type
    pub fn resolve<I, O>(&self) -> Result<Arc<CallPlan>, ConfigurationError>
    where
        I: ProcedureInput,
        O: ProcedureOutput
    {
        let slot = self.slot(TypeId::of::<I>());

        let mut built = false;
        let plan = slot.get_or_try_init(|| {
            built = true;
            self.builds.fetch_add(1, Ordering::Relaxed);
            CallPlan::build::<I, O>().map(Arc::new)
        })?;
        if !built {
            trace!(procedure = plan.procedure().name(), "call plan cache hit");
        }

        plan.expect_output::<O>().inspect_err(|err| {
            warn!(procedure = plan.procedure().name(), "{err}");
        })?;
        Ok(Arc::clone(plan))
    }

    /// Slot for `key`, inserting an empty one on first sight.
    fn slot(&self, key: TypeId) -> Slot {
        if let Some(slot) = self.plans.get(&key) {
            return Arc::clone(slot.value());
        }
        Arc::clone(self.plans.entry(key).or_default().value())
    }

    /// Check if a plan for input type `I` has been built.
    pub fn contains<I: ProcedureInput>(&self) -> bool {
        self.plans
            .get(&TypeId::of::<I>())
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Number of built plans.
    pub fn len(&self) -> usize {
        self.plans
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    /// Check if no plan has been built yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of plan builds attempted over the registry's lifetime.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}
