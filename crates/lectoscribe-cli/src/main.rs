mod app;
mod args;
mod commands;
mod ui;

use clap::Parser;

#[tokio::main]
async fn main() {
    // A .env next to the binary may carry LECTOSCRIBE_TOKEN etc.
    let _ = dotenvy::dotenv();

    let cli = args::Cli::parse();
    if cli.verbose {
        lectoscribe_core::set_verbose(true);
    }

    let result = match cli.command {
        args::Command::Record(record_args) => commands::record::run(record_args).await,
        args::Command::Upload(upload_args) => commands::upload::run(upload_args).await,
        args::Command::Login(login_args) => commands::login::run(login_args).await,
        args::Command::Config(config_args) => commands::config::run(config_args),
        args::Command::Devices => commands::devices::run(),
        args::Command::History => commands::history::run(),
    };

    if let Err(err) = result {
        ui::error(&format!("{err:#}"));
        std::process::exit(1);
    }
}
