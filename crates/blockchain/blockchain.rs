//! In-memory chain history used to answer state-sync requests.

pub mod block;
pub mod chain;
pub mod error;
pub mod renderer;
pub mod state_refs;

pub use block::{Block, BlockHeader, BlockStateMap};
pub use chain::Chain;
pub use error::ChainError;
pub use state_refs::{BlockStates, StateReferences, build_state_references};
