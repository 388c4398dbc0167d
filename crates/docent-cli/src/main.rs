//! Docent CLI - Turn PDFs into interactive study sessions.

use clap::Parser;
use docent_cli::{commands, explore, Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> docent_cli::Result<()> {
    let cli = Cli::parse();

    // Load or create config
    let config = Config::load().unwrap_or_else(|_| {
        let cfg = Config::default();
        cfg.save().ok();
        cfg
    });

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Upload(args) => commands::execute_upload(args, &config, &formatter).await,
        Command::List => commands::execute_list(&config, &formatter),
        Command::Show(args) => commands::execute_show(args, &config, &formatter),
        Command::Regen(args) => commands::execute_regen(args, &config, &formatter).await,
        Command::Delete(args) => commands::execute_delete(args, &config, &formatter),
        Command::Purge(args) => commands::execute_purge(args, &config, &formatter),
        Command::Explore(args) => explore::run_explore(args, &config, &formatter).await,
    }
}
