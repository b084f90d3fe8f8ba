use clap::Parser;
use lectio::api::Language;
use lectio::core::config::{self, CliOverrides};
use lectio::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "lectio", about = "Terminal reader for a multilingual scripture API")]
struct Args {
    /// Scripture API base URL (overrides config and LECTIO_BACKEND_URL)
    #[arg(short, long)]
    backend_url: Option<String>,

    /// Display language
    #[arg(short, long, value_enum)]
    language: Option<Language>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to lectio.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("lectio.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading ~/.lectio/config.toml: {e}");
            std::process::exit(1);
        }
    };
    let cli = CliOverrides {
        backend_url: args.backend_url,
        language: args.language,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Lectio starting up against {} in {}",
        resolved.backend_url,
        resolved.language
    );

    tui::run(resolved)
}
