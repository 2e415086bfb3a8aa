//! # statesync P2P
//!
//! Wire protocol used by peers to catch up on account state.
//!
//! Every message travels as an ordered list of frames: four common frames
//! (version stamp, message type, sending peer, signature) followed by the
//! message payload. The main payload is [`RecentStates`](messages::RecentStates),
//! which carries, for a requested tip, the blocks that touched each account and
//! the compressed states of a selected subset of those blocks.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`frame`] | Frame helpers and the [`FrameReader`](frame::FrameReader) cursor |
//! | [`message`] | Message types, dispatch and the signed [`Envelope`](message::Envelope) |
//! | [`messages`] | Payload definitions |
//! | [`sync`] | Snapshot selection and reply assembly |
//! | [`types`] | Peer and version descriptors |
//! | [`config`] | [`SyncConfig`](config::SyncConfig) |

pub mod config;
pub mod error;
pub mod frame;
pub mod message;
pub mod messages;
pub mod sync;
pub mod types;
pub mod utils;

pub use config::SyncConfig;
pub use message::{Envelope, Message, MessageType, Payload};
