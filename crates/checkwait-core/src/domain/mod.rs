//! Domain model for check-run gating.

pub mod aligned;
pub mod check;
pub mod target;

pub use aligned::AlignedResult;
pub use check::{CheckConclusion, CheckSnapshot, CheckStatus, ObservedCheck, UnknownStateError};
pub use target::RefTarget;
