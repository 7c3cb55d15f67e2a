use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docpipe_common::{logger, AppConfig};
use docpipe_llm::ModelService;
use std::io::Read;
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    match find_project_root().map(|root| root.join(".env")) {
        Some(env_path) if env_path.exists() => {
            dotenv::from_path(&env_path).ok();
        }
        _ => {
            dotenv::dotenv().ok();
        }
    }
}

#[derive(Parser)]
#[command(name = "docpipe")]
#[command(about = "docpipe - summarization and extractive QA over long documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides SERVER_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides SERVER_PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Summarize a document and print the summary
    Summarize {
        /// Input file, or "-" for stdin
        #[arg(long, short)]
        input: String,

        /// Summary upper bound, in model tokens
        #[arg(long, default_value_t = 150)]
        max_length: usize,

        /// Summary lower bound, in model tokens
        #[arg(long, default_value_t = 30)]
        min_length: usize,
    },
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}

async fn serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server_host = host;
    }
    if let Some(port) = port {
        config.server_port = port;
    }
    config.validate()?;

    logger::setup_logging(&config)?;

    tracing::info!("docpipe starting...");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Model server: {}", config.ollama_base_url);
    tracing::info!(
        "  Models: summarization={}, qa={}",
        config.summarization_model,
        config.qa_model
    );

    println!("Server listening on http://{}", config.server_bind_address());

    docpipe_server::start_server(config).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();
    let config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(config, host, port).await?,
        Some(Commands::Summarize {
            input,
            max_length,
            min_length,
        }) => {
            logger::setup_console_logging(&config.log_level)?;

            let text = read_input(&input)?;
            let service = ModelService::from_config(&config).await?;
            let summary = service.summarize(&text, max_length, min_length).await?;

            println!("{}", summary);
        }
        None => serve(config, None, None).await?,
    }

    Ok(())
}
