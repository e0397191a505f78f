// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Procedure execution.
//!
//! [`ProcedureExecutor`] is the public entry point. It resolves the call plan
//! through its [`PlanCache`], marshals the input, hands a [`ProcedureCall`]
//! to the [`CallPrimitive`] and marshals the returned values into a fresh
//! output object.
//!
//! # Flow
//!
//! ```text
//! execute(&input)
//! │
//! ├── PlanCache::resolve::<I, O>()   → Arc<CallPlan> (built at most once)
//! ├── extract_inputs(&input)         → ParamMap
//! ├── CallPrimitive::invoke(call)    → ParamMap (blocking)
//! └── populate_output::<O>(&result)  → O
//! ```
//!
//! Every error propagates to the caller unchanged; there is no retry.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
    ProcedureInput, ProcedureOutput,
    cache::PlanCache,
    descriptor::{ProcedureDescriptor, ResultSetDescriptor},
    error::ExecuteError,
    marshal::{extract_inputs, populate_output},
    plan::{CallPlan, ParameterDeclaration},
    value::ParamMap
};

/// Database side of a procedure call.
///
/// Implementations own connection acquisition, transaction context and the
/// actual SQL dispatch. They receive the same immutable plan on every call
/// for a given input type.
///
/// # Result Map
///
/// The returned map holds OUT and INOUT values under their bound names and,
/// for each of [`ProcedureCall::result_sets`], a [`Value::Rows`] under the
/// result-set name, typically built with [`ResultSetDescriptor::map_rows`].
///
/// [`Value::Rows`]: crate::Value::Rows
///
/// # Example
///
/// ```rust,ignore
/// impl CallPrimitive for MyDriver {
///     type Error = DriverError;
///
///     fn invoke(&self, call: ProcedureCall<'_>) -> Result<ParamMap, DriverError> {
///         let mut statement = self.prepare(&call.call_string())?;
///         for declaration in call.parameters() {
///             statement.bind(declaration, call.inputs().get(declaration.name()))?;
///         }
///         statement.execute()
///     }
/// }
/// ```
pub trait CallPrimitive {
    /// Error reported when the invocation fails at the database.
    type Error;

    /// Invoke the procedure.
    ///
    /// # Errors
    ///
    /// Any database-level failure; it reaches the caller of
    /// [`ProcedureExecutor::execute`] as [`ExecuteError::Execution`].
    fn invoke(&self, call: ProcedureCall<'_>) -> Result<ParamMap, Self::Error>;
}

impl<C: CallPrimitive + ?Sized> CallPrimitive for &C {
    type Error = C::Error;

    fn invoke(&self, call: ProcedureCall<'_>) -> Result<ParamMap, Self::Error> {
        (**self).invoke(call)
    }
}

impl<C: CallPrimitive + ?Sized> CallPrimitive for Arc<C> {
    type Error = C::Error;

    fn invoke(&self, call: ProcedureCall<'_>) -> Result<ParamMap, Self::Error> {
        (**self).invoke(call)
    }
}

/// One invocation handed to the [`CallPrimitive`].
#[derive(Debug)]
pub struct ProcedureCall<'a> {
    plan:   &'a CallPlan,
    inputs: ParamMap
}

impl<'a> ProcedureCall<'a> {
    /// Pair a plan with the call arguments.
    pub const fn new(plan: &'a CallPlan, inputs: ParamMap) -> Self {
        Self {
            plan,
            inputs
        }
    }

    /// Procedure identity.
    pub const fn procedure(&self) -> &'a ProcedureDescriptor {
        self.plan.procedure()
    }

    /// Procedure name.
    pub fn name(&self) -> &'a str {
        self.plan.procedure().name()
    }

    /// Schema, if declared.
    pub fn schema(&self) -> Option<&'a str> {
        self.plan.procedure().schema()
    }

    /// Ordered parameter declarations.
    pub fn parameters(&self) -> &'a [ParameterDeclaration] {
        self.plan.parameters()
    }

    /// Result-set bindings, each with its row constructor.
    pub fn result_sets(&self) -> &'a [ResultSetDescriptor] {
        self.plan.result_sets()
    }

    /// Call arguments keyed by bound name.
    pub const fn inputs(&self) -> &ParamMap {
        &self.inputs
    }

    /// Take ownership of the call arguments.
    pub fn into_inputs(self) -> ParamMap {
        self.inputs
    }

    /// The whole plan.
    pub const fn plan(&self) -> &'a CallPlan {
        self.plan
    }

    /// JDBC escape syntax for the call.
    pub fn call_string(&self) -> String {
        self.plan.call_string()
    }
}

/// Executes stored procedures described by [`ProcedureInput`] types.
///
/// Safe to share between threads when the call primitive is. Executors
/// created with [`with_cache`](Self::with_cache) share one plan registry.
///
/// # Example
///
/// ```rust,ignore
/// let executor = ProcedureExecutor::new(driver);
/// let user: UserResult = executor.execute(&GetUser { user_id: 7 })?;
/// ```
#[derive(Debug)]
pub struct ProcedureExecutor<C> {
    primitive: C,
    cache:     Arc<PlanCache>
}

impl<C: CallPrimitive> ProcedureExecutor<C> {
    /// Create an executor with its own plan registry.
    pub fn new(primitive: C) -> Self {
        Self::with_cache(primitive, Arc::new(PlanCache::new()))
    }

    /// Create an executor using a shared plan registry.
    pub const fn with_cache(primitive: C, cache: Arc<PlanCache>) -> Self {
        Self {
            primitive,
            cache
        }
    }

    /// Plan registry in use.
    pub const fn cache(&self) -> &Arc<PlanCache> {
        &self.cache
    }

    /// Underlying call primitive.
    pub const fn primitive(&self) -> &C {
        &self.primitive
    }

    /// Call the procedure declared on `I` and read the results into `O`.
    ///
    /// # Errors
    ///
    /// - [`ExecuteError::Configuration`] — `I` has no usable procedure
    ///   descriptor, `I` was planned for another output type, or `O` cannot
    ///   be constructed. The call primitive is not invoked for the first two.
    /// - [`ExecuteError::Marshal`] — a field could not be read or written
    /// - [`ExecuteError::Execution`] — the call primitive failed
    pub fn execute<I, O>(&self, input: &I) -> Result<O, ExecuteError<C::Error>>
    where
        I: ProcedureInput,
        O: ProcedureOutput
    {
        let plan = self.cache.resolve::<I, O>()?;
        let inputs = extract_inputs(input, plan.input_layout())?;

        debug!(
            procedure = %plan.procedure().qualified_name(),
            inputs = inputs.len(),
            "invoking stored procedure"
        );
        let result = self
            .primitive
            .invoke(ProcedureCall::new(&plan, inputs))
            .map_err(ExecuteError::Execution)?;
        trace!(
            procedure = plan.procedure().name(),
            values = result.len(),
            "stored procedure returned"
        );

        Ok(populate_output(&result, plan.output_layout())?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering}
    };

    use super::*;
    use crate::{
        descriptor::{Direction, ParameterDescriptor, TypeLayout},
        error::{ConfigurationError, MarshalError, ValueError},
        value::{FromValue, ToValue, Value}
    };

    #[derive(Debug, thiserror::Error)]
    #[error("deadlock detected")]
    struct Deadlock;

    #[derive(Default)]
    struct Recorder {
        calls:   AtomicUsize,
        seen:    Mutex<Vec<String>>,
        respond: ParamMap,
        fail:    bool
    }

    impl CallPrimitive for Recorder {
        type Error = Deadlock;

        fn invoke(&self, call: ProcedureCall<'_>) -> Result<ParamMap, Deadlock> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(call.call_string());
            }
            if self.fail {
                return Err(Deadlock);
            }
            Ok(self.respond.clone())
        }
    }

    struct Lookup {
        id: i32
    }

    impl ProcedureInput for Lookup {
        fn layout() -> TypeLayout {
            TypeLayout::named("Lookup")
                .procedure(ProcedureDescriptor::new("lookup").with_schema("app"))
                .parameter(ParameterDescriptor::new("id", Direction::In, 4))
        }

        fn read_field(&self, field: &str) -> Result<Value, MarshalError> {
            match field {
                "id" => Ok(self.id.to_value()),
                _ => Err(MarshalError::unknown_field("Lookup", field))
            }
        }
    }

    struct Nameless;

    impl ProcedureInput for Nameless {
        fn layout() -> TypeLayout {
            TypeLayout::named("Nameless")
        }

        fn read_field(&self, field: &str) -> Result<Value, MarshalError> {
            Err(MarshalError::unknown_field("Nameless", field))
        }
    }

    #[derive(Debug, Default)]
    struct Found {
        name: String
    }

    impl ProcedureOutput for Found {
        fn layout() -> TypeLayout {
            TypeLayout::named("Found").parameter(ParameterDescriptor::new("name", Direction::Out, 12))
        }

        fn construct() -> Result<Self, ConfigurationError> {
            Ok(Self::default())
        }

        fn write_field(&mut self, field: &str, value: Value) -> Result<(), MarshalError> {
            match field {
                "name" => {
                    self.name = String::from_value(value)
                        .map_err(|e: ValueError| MarshalError::write("Found", field, e))?;
                    Ok(())
                }
                _ => Err(MarshalError::unknown_field("Found", field))
            }
        }
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn responding(name: &str) -> Recorder {
        Recorder {
            respond: [("name".to_owned(), Value::Text(name.to_owned()))].into(),
            ..Recorder::default()
        }
    }

    #[test]
    fn executes_and_populates() {
        init_tracing();
        let executor = ProcedureExecutor::new(responding("alice"));
        let found: Found = executor.execute(&Lookup { id: 7 }).unwrap();
        assert_eq!(found.name, "alice");
        assert_eq!(executor.primitive().calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            executor.primitive().seen.lock().unwrap().as_slice(),
            ["{call app.lookup(?, ?)}".to_owned()]
        );
    }

    #[test]
    fn plan_is_built_once_across_calls() {
        let executor = ProcedureExecutor::new(responding("bob"));
        let _: Found = executor.execute(&Lookup { id: 1 }).unwrap();
        let _: Found = executor.execute(&Lookup { id: 2 }).unwrap();
        assert_eq!(executor.cache().builds(), 1);
        assert_eq!(executor.primitive().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn missing_descriptor_never_invokes() {
        let executor = ProcedureExecutor::new(responding("x"));
        let err = executor.execute::<Nameless, Found>(&Nameless).unwrap_err();
        assert!(matches!(
            err,
            ExecuteError::Configuration(ConfigurationError::MissingProcedure { .. })
        ));
        assert_eq!(executor.primitive().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn execution_error_is_propagated() {
        let executor = ProcedureExecutor::new(Recorder {
            fail: true,
            ..Recorder::default()
        });
        let err = executor.execute::<Lookup, Found>(&Lookup { id: 1 }).unwrap_err();
        assert!(err.is_execution());
        assert!(matches!(err.into_execution(), Some(Deadlock)));
    }

    #[test]
    fn shared_cache_between_executors() {
        let cache = Arc::new(PlanCache::new());
        let one = ProcedureExecutor::with_cache(responding("a"), Arc::clone(&cache));
        let two = ProcedureExecutor::with_cache(responding("b"), Arc::clone(&cache));
        let _: Found = one.execute(&Lookup { id: 1 }).unwrap();
        let found: Found = two.execute(&Lookup { id: 2 }).unwrap();
        assert_eq!(found.name, "b");
        assert_eq!(cache.builds(), 1);
    }

    #[test]
    fn borrowed_primitive_works() {
        let recorder = responding("c");
        let executor = ProcedureExecutor::new(&recorder);
        let found: Found = executor.execute(&Lookup { id: 3 }).unwrap();
        assert_eq!(found.name, "c");
        assert_eq!(recorder.calls.load(Ordering::SeqCst), 1);
    }
}
