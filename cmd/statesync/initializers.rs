use eyre::WrapErr;
use statesync_blockchain::{
    Block, BlockStateMap, Chain,
    renderer::{AnonymousRenderer, LoggedRenderer},
};
use statesync_codec::Value;
use statesync_common::Address;
use statesync_p2p::SyncConfig;
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::Directive};

use crate::cli::Options;

pub fn init_tracing(opts: &Options) {
    let log_filter = EnvFilter::builder()
        .with_default_directive(Directive::from(opts.log_level))
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(log_filter).init();
}

pub fn load_config(opts: &Options) -> eyre::Result<SyncConfig> {
    match &opts.config {
        Some(path) => SyncConfig::from_file(path)
            .wrap_err_with(|| format!("Failed to load config from {}", path.display())),
        None => Ok(SyncConfig::default()),
    }
}

/// Builds a chain where block `i` writes the state of account `(i - 1) % accounts`.
pub fn init_sample_chain(accounts: u64, blocks: u64) -> eyre::Result<Chain> {
    eyre::ensure!(accounts > 0, "The sample chain needs at least one account");

    let mut chain = Chain::new(Block::genesis(0, BlockStateMap::new()));
    chain.add_renderer(LoggedRenderer::new(AnonymousRenderer::new().on_block(
        |_old_tip, new_tip| {
            info!(
                index = new_tip.index(),
                hash = format_args!("{:#x}", new_tip.hash()),
                "New tip"
            );
            Ok(())
        },
    )));

    for index in 1..=blocks {
        let account = sample_account((index - 1) % accounts);
        let state = Value::dictionary([
            ("balance", Value::from(index * 10)),
            ("nonce", Value::from(index)),
        ]);
        let block = Block::child_of(chain.tip(), index, BlockStateMap::from([(account, state)]));
        chain.append(block)?;
    }
    Ok(chain)
}

fn sample_account(n: u64) -> Address {
    Address::from_low_u64_be(n + 1)
}
