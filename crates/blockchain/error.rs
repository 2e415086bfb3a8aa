use statesync_common::{BlockHash, H256};

use crate::renderer::RenderError;

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("Block #{got} cannot be appended, expected #{expected}")]
    InvalidIndex { expected: u64, got: u64 },
    #[error("Block {hash:#x} does not point at the tip {expected:#x}")]
    ParentMismatch { hash: BlockHash, expected: BlockHash },
    #[error("Block {0:#x} is already part of the chain")]
    DuplicateBlock(BlockHash),
    #[error("Chains do not share the genesis block (ours {ours:#x}, theirs {theirs:#x})")]
    GenesisMismatch { ours: H256, theirs: H256 },
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}
