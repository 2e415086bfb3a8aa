mod ping;
mod recent_states;

pub use ping::{Ping, Pong};
pub use recent_states::{
    DEFAULT_COMPRESSION_LEVEL, MISSING_SENTINEL, Pagination, PayloadKind, RecentStates,
};
