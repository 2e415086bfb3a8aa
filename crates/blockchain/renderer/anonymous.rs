use super::{RenderError, Renderer};
use crate::block::Block;

type BlockFn = dyn Fn(&Block, &Block) -> Result<(), RenderError> + Send + Sync;
type ReorgFn = dyn Fn(&Block, &Block, &Block) -> Result<(), RenderError> + Send + Sync;

/// Renderer built from closures. Events without a closure are ignored.
#[derive(Default)]
pub struct AnonymousRenderer {
    block: Option<Box<BlockFn>>,
    reorg: Option<Box<ReorgFn>>,
}

impl AnonymousRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_block<F>(mut self, f: F) -> Self
    where
        F: Fn(&Block, &Block) -> Result<(), RenderError> + Send + Sync + 'static,
    {
        self.block = Some(Box::new(f));
        self
    }

    pub fn on_reorg<F>(mut self, f: F) -> Self
    where
        F: Fn(&Block, &Block, &Block) -> Result<(), RenderError> + Send + Sync + 'static,
    {
        self.reorg = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for AnonymousRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnonymousRenderer")
            .field("block", &self.block.is_some())
            .field("reorg", &self.reorg.is_some())
            .finish()
    }
}

impl Renderer for AnonymousRenderer {
    fn render_block(&self, old_tip: &Block, new_tip: &Block) -> Result<(), RenderError> {
        match &self.block {
            Some(f) => f(old_tip, new_tip),
            None => Ok(()),
        }
    }

    fn render_reorg(
        &self,
        old_tip: &Block,
        new_tip: &Block,
        branchpoint: &Block,
    ) -> Result<(), RenderError> {
        match &self.reorg {
            Some(f) => f(old_tip, new_tip, branchpoint),
            None => Ok(()),
        }
    }
}
