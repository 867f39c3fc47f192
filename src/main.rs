use clap::Parser;
use marketnav::core::config::{self, CliOverrides, MarketnavConfig};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "marketnav", about = "Browse marketplace categories and listings")]
struct Args {
    /// Use the Trade Me sandbox instead of production
    #[arg(long)]
    sandbox: bool,

    /// API base URL (overrides --sandbox and the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Listings fetched per category
    #[arg(long)]
    rows: Option<u32>,

    /// Category id whose listings are shown on startup
    #[arg(short, long)]
    category: Option<String>,

    /// Log at info instead of debug
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to marketnav.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = if args.quiet {
        LevelFilter::Info
    } else {
        LevelFilter::Debug
    };
    if let Ok(log_file) = File::create("marketnav.log") {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    log::info!("marketnav starting up");

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        MarketnavConfig::default()
    });
    let cli = CliOverrides {
        base_url: args.base_url,
        sandbox: args.sandbox,
        rows: args.rows,
    };
    let resolved = config::resolve(&file_config, &cli);

    marketnav::tui::run(resolved, args.category)
}
