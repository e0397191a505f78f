// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Output type with nothing to receive; expands without warnings.

#![deny(warnings)]

use procedure_derive::{ProcedureOutput, Value};

#[derive(ProcedureOutput, Default)]
pub struct NothingBack {}

fn main() {
    let mut out = <NothingBack as ProcedureOutput>::construct().unwrap();
    assert!(out.write_field("anything", Value::Null).is_err());
    assert!(<NothingBack as ProcedureOutput>::layout().parameters().is_empty());
}
