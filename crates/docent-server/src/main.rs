//! Docent server binary
//!
//! Starts the HTTP server for document upload, extraction, and session views.

use docent_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        let config_path = &args[2];
        ServerConfig::from_file(config_path)?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default test configuration");
        eprintln!("Usage: docent-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default_test_config()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Docent Server - PDF study sessions over HTTP");
    println!();
    println!("USAGE:");
    println!("    docent-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    docent-server --config config/server.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 8080)");
    println!("    - jwt_secret: Secret key for bearer token signing");
    println!("    - token_expiry_secs: Token expiry in seconds (default: 3600)");
    println!("    - database_path: SQLite database file (default: 'docent.db')");
    println!("    - [completion]: endpoint, model, api_key_env");
    println!();
    println!("    The API key itself is read from the environment variable");
    println!("    named by completion.api_key_env (default: DOCENT_API_KEY).");
    println!();
}
