pub use ethereum_types::{Address, H256};
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;
pub use bytes::Bytes;

/// Identifier of a block: the SHA-256 digest of its encoded header and states.
pub type BlockHash = H256;
