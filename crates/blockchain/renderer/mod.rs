//! Chain event observers.
//!
//! A [`Chain`](crate::chain::Chain) notifies its renderers synchronously, in the
//! order they were registered, after the change they describe has been applied.

mod anonymous;
mod logged;

pub use anonymous::AnonymousRenderer;
pub use logged::LoggedRenderer;

use crate::block::Block;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct RenderError(pub String);

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub trait Renderer: Send + Sync {
    /// Name used when reporting on this renderer.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called when the tip moves from `old_tip` to `new_tip`.
    fn render_block(&self, _old_tip: &Block, _new_tip: &Block) -> Result<(), RenderError> {
        Ok(())
    }

    /// Called when the chain is replaced by one that forked off at `branchpoint`.
    /// [`render_block`](Renderer::render_block) follows for the same tips.
    fn render_reorg(
        &self,
        _old_tip: &Block,
        _new_tip: &Block,
        _branchpoint: &Block,
    ) -> Result<(), RenderError> {
        Ok(())
    }
}
