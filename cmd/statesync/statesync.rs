mod cli;
mod initializers;

use clap::Parser;
use statesync_crypto::{CryptoBackend, Secp256k1Backend, keys::generate_secret_key};
use statesync_p2p::{
    Envelope, Message,
    sync::{LatestPerAccount, RecentStatesQuery, RecentStatesResponder},
    types::{AppProtocolVersion, Endpoint, Peer},
};
use std::sync::Arc;
use tracing::info;

use crate::{
    cli::Options,
    initializers::{init_sample_chain, init_tracing, load_config},
};

fn main() -> eyre::Result<()> {
    let opts = Options::parse();
    init_tracing(&opts);

    let config = load_config(&opts)?;
    let chain = init_sample_chain(opts.accounts, opts.blocks)?;

    let backend: Arc<dyn CryptoBackend> = Arc::new(Secp256k1Backend::new());
    let secret_key = generate_secret_key();
    let peer = Peer::new(
        backend.public_key(&secret_key),
        Endpoint::new(opts.p2p_addr.clone(), opts.p2p_port),
    );
    let version =
        AppProtocolVersion::sign(config.app_protocol_version, backend.as_ref(), &secret_key)?;

    let responder = RecentStatesResponder::new(LatestPerAccount, &config);
    let reply = responder.respond(&chain, &RecentStatesQuery::new(chain.tip().hash()));
    let frames = Envelope::new(version, peer, reply).to_frames(backend.as_ref(), &secret_key)?;

    let envelope = Envelope::parse(&frames, backend.as_ref(), &config)?;
    let Message::RecentStates(states) = &envelope.message else {
        eyre::bail!("Decoded an unexpected {} message", envelope.message);
    };
    info!(
        peer = %envelope.peer,
        frames = frames.len(),
        tip = format_args!("{:#x}", states.tip_hash()),
        missing = states.is_missing(),
        accounts = states.state_references().len(),
        blocks = states.block_states().len(),
        "Decoded recent states"
    );
    Ok(())
}
