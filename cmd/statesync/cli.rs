use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "statesync",
    version,
    about = "Builds a sample chain, answers a recent-states query for its tip and decodes the signed reply"
)]
pub struct Options {
    #[arg(long = "log.level", default_value_t = Level::INFO, value_name = "LOG_LEVEL")]
    pub log_level: Level,
    #[arg(
        long = "config",
        value_name = "CONFIG_FILE",
        help = "JSON file with the sync settings. Defaults are used when omitted."
    )]
    pub config: Option<PathBuf>,
    #[arg(
        long = "accounts",
        default_value_t = 5,
        value_name = "COUNT",
        help_heading = "Sample chain options"
    )]
    pub accounts: u64,
    #[arg(
        long = "blocks",
        default_value_t = 10,
        value_name = "COUNT",
        help_heading = "Sample chain options"
    )]
    pub blocks: u64,
    #[arg(
        long = "p2p.addr",
        default_value = "127.0.0.1",
        value_name = "ADDRESS",
        help_heading = "P2P options"
    )]
    pub p2p_addr: String,
    #[arg(
        long = "p2p.port",
        default_value_t = 31234,
        value_name = "PORT",
        help_heading = "P2P options"
    )]
    pub p2p_port: u16,
}
