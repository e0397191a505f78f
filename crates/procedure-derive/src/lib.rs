// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # procedure-derive
//!
//! One crate, all features. Re-exports:
//! - [`ProcedureInput`], [`ProcedureOutput`] and [`FromRow`] derive macros
//!   from `procedure-derive-impl`
//! - All types from `procedure-core` ([`ProcedureExecutor`], [`PlanCache`],
//!   [`CallPrimitive`], [`Value`], ...)
//!
//! Each derive shares its name with the trait it implements, as with
//! `Debug` or `Default`.
//!
//! # Quick Start
//!
//! ```rust
//! use procedure_derive::prelude::*;
//! use procedure_derive::{FromRow, ProcedureInput, ProcedureOutput};
//!
//! #[derive(ProcedureInput)]
//! #[procedure(name = "get_user", schema = "hr")]
//! pub struct GetUser {
//!     #[param(direction = "in", sql_type = SqlType::INTEGER)]
//!     pub user_id: i32
//! }
//!
//! #[derive(FromRow, Clone)]
//! pub struct OrderRow {
//!     pub id: i64
//! }
//!
//! #[derive(ProcedureOutput, Default)]
//! pub struct UserResult {
//!     #[param(direction = "out", sql_type = SqlType::VARCHAR)]
//!     pub user_name: Option<String>,
//!     #[result_set(name = "orders")]
//!     pub orders: Vec<OrderRow>
//! }
//!
//! struct Database;
//!
//! impl CallPrimitive for Database {
//!     type Error = std::convert::Infallible;
//!
//!     fn invoke(&self, call: ProcedureCall<'_>) -> Result<ParamMap, Self::Error> {
//!         assert_eq!(call.call_string(), "{call hr.get_user(?, ?)}");
//!         let orders = call.result_sets()[0]
//!             .map_rows(vec![Row::new().with("id", 7_i64)])
//!             .unwrap();
//!         Ok(ParamMap::from([
//!             ("user_name".to_owned(), Value::from("alice")),
//!             ("orders".to_owned(), orders)
//!         ]))
//!     }
//! }
//!
//! let executor = ProcedureExecutor::new(Database);
//! let result: UserResult = executor.execute(&GetUser { user_id: 1 }).unwrap();
//! assert_eq!(result.user_name.as_deref(), Some("alice"));
//! assert_eq!(result.orders[0].id, 7);
//! ```

pub use procedure_core::*;
pub use procedure_derive_impl::{FromRow, ProcedureInput, ProcedureOutput};
