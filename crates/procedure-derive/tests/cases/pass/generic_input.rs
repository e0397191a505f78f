// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generic input type; unmarked fields need no conversions or thread safety.

use std::{cell::Cell, rc::Rc};

use procedure_derive::{ProcedureInput, SqlType};

#[derive(ProcedureInput)]
#[procedure(name = "audit")]
pub struct Audit<C: 'static> {
    #[param(direction = "in", sql_type = SqlType::VARCHAR)]
    pub action: String,

    pub context: C,

    pub retries: Cell<u8>
}

fn main() {
    let layout = <Audit<Rc<str>> as procedure_derive::ProcedureInput>::layout();
    assert_eq!(layout.procedure_descriptor().map(|p| p.name()), Some("audit"));
}
