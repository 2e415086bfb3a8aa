//! Sending side of the state-sync exchange: choosing which block states to
//! ship and assembling the reply.

pub mod responder;
pub mod selector;

pub use responder::{RecentStatesQuery, RecentStatesResponder};
pub use selector::{AfterCheckpoint, LatestPerAccount, SnapshotPolicy};
