// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! One type deriving both sides of a call.

use procedure_derive::{ProcedureInput, ProcedureOutput};

#[derive(ProcedureInput, ProcedureOutput, Default)]
#[procedure(name = "increment", rename_all = "UPPERCASE")]
pub struct Counter {
    #[param(direction = "inout", sql_type = 4)]
    pub value: i32
}

fn main() {
    let input = <Counter as ProcedureInput>::layout();
    let output = <Counter as ProcedureOutput>::layout();
    assert_eq!(input.parameters()[0].bound_name(), "VALUE");
    assert_eq!(output.parameters()[0].bound_name(), "VALUE");
}
