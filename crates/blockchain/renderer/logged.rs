use tracing::{Level, debug, error, info, trace, warn};

use super::{RenderError, Renderer};
use crate::block::Block;

/// Emits a tracing event at a level chosen at runtime. The tracing macros
/// need a constant level, so each one gets its own callsite.
macro_rules! event_at {
    ($level:expr, $($args:tt)+) => {{
        let level = $level;
        if level == Level::TRACE {
            trace!($($args)+)
        } else if level == Level::DEBUG {
            debug!($($args)+)
        } else if level == Level::INFO {
            info!($($args)+)
        } else if level == Level::WARN {
            warn!($($args)+)
        } else {
            error!($($args)+)
        }
    }};
}

/// Wraps a renderer and reports every event it receives: once before the call,
/// once after it succeeds, and as an error if it fails. The inner result is
/// passed through untouched.
///
/// Before/after events go out at [`Level::DEBUG`] unless set with
/// [`LoggedRenderer::with_level`]. Failures are always logged as errors.
#[derive(Debug)]
pub struct LoggedRenderer<R> {
    inner: R,
    level: Level,
}

impl<R: Renderer> LoggedRenderer<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            level: Level::DEBUG,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Renderer> Renderer for LoggedRenderer<R> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn render_block(&self, old_tip: &Block, new_tip: &Block) -> Result<(), RenderError> {
        let renderer = self.inner.name();
        let (new_index, new_hash) = (new_tip.index(), new_tip.hash());
        let (old_index, old_hash) = (old_tip.index(), old_tip.hash());

        event_at!(
            self.level,
            renderer,
            method = "render_block",
            new_index,
            new_hash = format_args!("{new_hash:#x}"),
            old_index,
            old_hash = format_args!("{old_hash:#x}"),
            "Invoking render_block()"
        );
        match self.inner.render_block(old_tip, new_tip) {
            Ok(()) => {
                event_at!(
                    self.level,
                    renderer,
                    method = "render_block",
                    new_index,
                    new_hash = format_args!("{new_hash:#x}"),
                    old_index,
                    old_hash = format_args!("{old_hash:#x}"),
                    "Invoked render_block()"
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    renderer,
                    method = "render_block",
                    new_index,
                    new_hash = format_args!("{new_hash:#x}"),
                    old_index,
                    old_hash = format_args!("{old_hash:#x}"),
                    %err,
                    "render_block() failed"
                );
                Err(err)
            }
        }
    }

    fn render_reorg(
        &self,
        old_tip: &Block,
        new_tip: &Block,
        branchpoint: &Block,
    ) -> Result<(), RenderError> {
        let renderer = self.inner.name();
        let (new_index, new_hash) = (new_tip.index(), new_tip.hash());
        let (old_index, old_hash) = (old_tip.index(), old_tip.hash());
        let (branchpoint_index, branchpoint_hash) = (branchpoint.index(), branchpoint.hash());

        event_at!(
            self.level,
            renderer,
            method = "render_reorg",
            new_index,
            new_hash = format_args!("{new_hash:#x}"),
            old_index,
            old_hash = format_args!("{old_hash:#x}"),
            branchpoint_index,
            branchpoint_hash = format_args!("{branchpoint_hash:#x}"),
            "Invoking render_reorg()"
        );
        match self.inner.render_reorg(old_tip, new_tip, branchpoint) {
            Ok(()) => {
                event_at!(
                    self.level,
                    renderer,
                    method = "render_reorg",
                    new_index,
                    new_hash = format_args!("{new_hash:#x}"),
                    old_index,
                    old_hash = format_args!("{old_hash:#x}"),
                    branchpoint_index,
                    branchpoint_hash = format_args!("{branchpoint_hash:#x}"),
                    "Invoked render_reorg()"
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    renderer,
                    method = "render_reorg",
                    new_index,
                    new_hash = format_args!("{new_hash:#x}"),
                    old_index,
                    old_hash = format_args!("{old_hash:#x}"),
                    branchpoint_index,
                    branchpoint_hash = format_args!("{branchpoint_hash:#x}"),
                    %err,
                    "render_reorg() failed"
                );
                Err(err)
            }
        }
    }
}
