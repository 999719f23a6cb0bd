//! Session-scoped accumulation of ingested rows.
//!
//! A [`Session`] owns an [`Accumulator`] and the per-platform set of
//! processed file names. Nothing here is global: each user (or each CLI
//! run) works on its own session and can [`Session::reset`] it.

mod accumulator;
mod compile;
mod session;

pub use accumulator::{Accumulator, OutputKind, Table};
pub use compile::{Canonical, Groupable, compile, compile_grouped};
pub use session::{BatchReport, FileOutcome, Session};
