//! # lather-ledger
//!
//! The authoritative record of which calendar days had a shower.
//!
//! [`EventLedger`] owns a deduplicated set of [`Day`]s persisted in a
//! [`KeyValueStore`] under [`LEDGER_KEY`]. It answers membership and count
//! queries and lays the set out as month grids and a one-year heatmap for
//! display (see [`grid`]).
//!
//! [`Day`]: lather_core::Day
//! [`KeyValueStore`]: lather_store::KeyValueStore

pub mod error;
pub mod grid;
mod ledger;

pub use error::LedgerError;
pub use ledger::{EventLedger, LEDGER_KEY};
