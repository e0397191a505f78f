// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Minimal input type with every direction.

use procedure_derive::{ProcedureInput, SqlType};

#[derive(ProcedureInput)]
#[procedure(name = "transfer", schema = "bank")]
pub struct Transfer {
    #[param(direction = "in", sql_type = SqlType::BIGINT)]
    pub from_account: i64,

    #[param(direction = "IN", sql_type = SqlType::BIGINT)]
    pub to_account: i64,

    #[param(direction = "InOut", sql_type = SqlType::DOUBLE, name = "p_amount")]
    pub amount: f64,

    #[param(direction = "out", sql_type = 12)]
    pub receipt: Vec<u8>,

    pub trace: std::time::Instant
}

fn main() {
    let layout = <Transfer as procedure_derive::ProcedureInput>::layout();
    assert_eq!(layout.parameters().len(), 4);
}
