// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only JSONL event logs, one file per named log.

pub mod log;

pub use log::{EventLog, EventRecord, ReplayFilter, Since};
