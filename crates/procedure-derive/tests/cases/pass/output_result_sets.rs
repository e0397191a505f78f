// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Output type with parameters and two result sets.

use procedure_derive::{FromRow, ProcedureOutput, SqlType};

#[derive(FromRow, Clone)]
pub struct Line {
    pub sku: String,
    #[column(name = "qty")]
    pub quantity: i32
}

#[derive(FromRow, Clone)]
pub struct Note {
    pub body: Option<String>,
    #[column(skip)]
    pub seen: bool
}

#[derive(ProcedureOutput, Default)]
#[output(rename_all = "PascalCase")]
pub struct Invoice {
    #[param(direction = "out", sql_type = SqlType::NUMERIC)]
    pub grand_total: f64,

    #[param(direction = "out", sql_type = SqlType::TIMESTAMP, name = "issued")]
    pub issued_at: Option<String>,

    #[result_set(name = "lines")]
    pub lines: Vec<Line>,

    #[result_set(name = "notes", row = Note)]
    pub notes: Vec<Note>,

    pub cached: Option<u64>
}

fn main() {
    let layout = <Invoice as procedure_derive::ProcedureOutput>::layout();
    assert_eq!(layout.parameters()[0].bound_name(), "GrandTotal");
    assert_eq!(layout.result_sets().len(), 2);
}
