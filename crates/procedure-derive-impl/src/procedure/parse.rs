// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for the procedure derive macros.
//!
//! Struct-level attributes go through darling's `FromDeriveInput`; field
//! markers are located manually and parsed per marker.
//!
//! # Architecture
//!
//! ```text
//! parse.rs (coordinator)
//! ├── attrs.rs     - #[procedure(...)] / #[output(...)] (darling)
//! ├── def.rs       - ProcedureDef, ProcedureName
//! ├── direction.rs - ParamDirection (in, out, inout)
//! ├── field.rs     - FieldDef, #[param(...)], #[result_set(...)]
//! └── rename.rs    - RenameRule (rename_all)
//! ```
//!
//! # Data Structures
//!
//! ```text
//! ProcedureDef
//! ├── ident: Ident
//! ├── generics: Generics
//! ├── procedure: Option<ProcedureName>   (input types only)
//! ├── rename_all: Option<RenameRule>
//! └── fields: Vec<FieldDef>
//!     └── FieldDef
//!         ├── ident: Ident
//!         └── role: Param(ParamConfig) | ResultSet(ResultSetConfig) | Plain
//! ```

mod attrs;
mod def;
mod direction;
mod field;
mod rename;


pub use def::ProcedureDef;
pub use direction::ParamDirection;
pub use field::FieldDef;
pub use rename::RenameRule;
