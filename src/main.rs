use std::fs::File;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use huddle::core::config::{self, CliOverrides};
use huddle::core::transport::LoopbackTransport;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "huddle", about = "Terminal chat rooms", version)]
struct Args {
    /// Invitation link or room id to join on startup
    #[arg(short, long)]
    join: Option<String>,

    /// Display name shown on your messages
    #[arg(short, long)]
    name: Option<String>,

    /// Base URL invitation links are built from
    #[arg(long)]
    invite_base: Option<String>,

    /// Log level written to huddle.log
    #[arg(long, default_value_t = LevelFilter::Debug)]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to huddle.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("huddle.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, falling back to defaults", e);
        config::HuddleConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            room: args.join.as_deref(),
            display_name: args.name.as_deref(),
            invitation_base_url: args.invite_base.as_deref(),
        },
    );

    log::info!(
        "Huddle starting up as {:?} (invitations at {})",
        resolved.display_name,
        resolved.invitation_base_url
    );

    let transport = Arc::new(LoopbackTransport::new(Duration::from_millis(
        resolved.delivery_delay_ms,
    )));
    huddle::tui::run(resolved, transport)
}
