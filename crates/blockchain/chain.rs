use statesync_codec::Value;
use statesync_common::{Address, BlockHash};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::{
    block::Block,
    error::ChainError,
    renderer::{RenderError, Renderer},
};

/// In-memory chain history, from the genesis block up to the tip.
///
/// Blocks are only checked for linkage (index and previous hash); their contents
/// are taken as given.
pub struct Chain {
    blocks: Vec<Block>,
    positions: HashMap<BlockHash, usize>,
    renderers: Vec<Box<dyn Renderer>>,
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("genesis", &self.genesis().hash())
            .field("tip", &self.tip().hash())
            .field("len", &self.blocks.len())
            .field("renderers", &self.renderers.len())
            .finish()
    }
}

impl Chain {
    pub fn new(genesis: Block) -> Self {
        let positions = HashMap::from([(genesis.hash(), 0)]);
        Self {
            blocks: vec![genesis],
            positions,
            renderers: Vec::new(),
        }
    }

    pub fn genesis(&self) -> &Block {
        &self.blocks[0]
    }

    pub fn tip(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// A chain always holds at least its genesis block.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, hash: &BlockHash) -> Option<&Block> {
        self.positions.get(hash).map(|&position| &self.blocks[position])
    }

    pub fn block_at(&self, index: u64) -> Option<&Block> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.blocks.get(index))
    }

    pub fn contains(&self, hash: &BlockHash) -> bool {
        self.positions.contains_key(hash)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Blocks from the genesis up to and including `tip_hash`, or `None` if the
    /// hash is not on this chain.
    pub fn blocks_until(&self, tip_hash: &BlockHash) -> Option<&[Block]> {
        let position = *self.positions.get(tip_hash)?;
        Some(&self.blocks[..=position])
    }

    pub fn add_renderer<R: Renderer + 'static>(&mut self, renderer: R) {
        self.renderers.push(Box::new(renderer));
    }

    /// Appends `block` on top of the tip and notifies the renderers.
    ///
    /// A renderer failure is returned after the block has been added; the remaining
    /// renderers are not notified.
    pub fn append(&mut self, block: Block) -> Result<(), ChainError> {
        let tip = self.tip();
        let expected = tip.index() + 1;
        if block.index() != expected {
            return Err(ChainError::InvalidIndex {
                expected,
                got: block.index(),
            });
        }
        if block.header.previous_hash != Some(tip.hash()) {
            return Err(ChainError::ParentMismatch {
                hash: block.hash(),
                expected: tip.hash(),
            });
        }
        if self.contains(&block.hash()) {
            return Err(ChainError::DuplicateBlock(block.hash()));
        }

        debug!(
            index = block.index(),
            hash = format_args!("{:#x}", block.hash()),
            "Appending block"
        );
        self.positions.insert(block.hash(), self.blocks.len());
        self.blocks.push(block);

        let old_tip = &self.blocks[self.blocks.len() - 2];
        self.render_block(old_tip, self.tip())?;
        Ok(())
    }

    /// Replaces this chain's blocks with those of `other`, which must share the
    /// same genesis. Renderers registered on `other` are dropped.
    ///
    /// Renderers see a reorg when blocks of the old chain were abandoned, then the
    /// tip change. Nothing is rendered if the tip does not move.
    pub fn swap(&mut self, other: Chain) -> Result<(), ChainError> {
        if other.genesis().hash() != self.genesis().hash() {
            return Err(ChainError::GenesisMismatch {
                ours: self.genesis().hash(),
                theirs: other.genesis().hash(),
            });
        }

        let common = self
            .blocks
            .iter()
            .zip(other.blocks.iter())
            .take_while(|(ours, theirs)| ours.hash() == theirs.hash())
            .count();
        let old_blocks = std::mem::replace(&mut self.blocks, other.blocks);
        self.positions = other.positions;

        let old_tip = &old_blocks[old_blocks.len() - 1];
        let branchpoint = &old_blocks[common - 1];
        let new_tip = self.tip();
        if old_tip.hash() == new_tip.hash() {
            return Ok(());
        }

        info!(
            old_index = old_tip.index(),
            new_index = new_tip.index(),
            branchpoint = branchpoint.index(),
            "Swapped chain"
        );
        if branchpoint.hash() != old_tip.hash() {
            for renderer in &self.renderers {
                renderer.render_reorg(old_tip, new_tip, branchpoint)?;
            }
        }
        self.render_block(old_tip, new_tip)?;
        Ok(())
    }

    /// State of `address` as of `block_hash`: the value written by the closest
    /// block at or before it that modified the account.
    pub fn state_at(&self, address: &Address, block_hash: &BlockHash) -> Option<&Value> {
        self.blocks_until(block_hash)?
            .iter()
            .rev()
            .find_map(|block| block.states.get(address))
    }

    fn render_block(&self, old_tip: &Block, new_tip: &Block) -> Result<(), RenderError> {
        for renderer in &self.renderers {
            renderer.render_block(old_tip, new_tip)?;
        }
        Ok(())
    }
}
