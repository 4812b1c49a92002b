use clap::{Parser, Subcommand};
use colored::Colorize;
use folio_core::{ApiClient, CliErrorDisplay, FolioConfig, LoggingConfig, ResumeSourceKind};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;

use commands::{cmd_chat, cmd_contact, cmd_resume, OutputFormat};
use config::CliOverrides;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = VERSION)]
#[command(about = "Folio - a portfolio in your terminal, with an assistant to ask about it")]
#[command(long_about = r#"
Folio renders a personal portfolio (about, skills, projects, experience,
education, contact) and relays questions to the portfolio's chat assistant.

Use 'folio resume' to read the portfolio, 'folio chat' to talk to the
assistant and 'folio status' to check that the backend is reachable.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(long, global = true, help = "Backend base URL (overrides FOLIO_API_URL)")]
    api_url: Option<String>,

    #[arg(long, global = true, help = "Disable colored output")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Chat with the portfolio assistant")]
    Chat {
        #[arg(short, long, help = "Send a single message and print the reply")]
        message: Option<String>,
    },

    #[command(about = "Show the resume")]
    Resume {
        #[arg(short, long, help = "Where to read the resume from (bundled, file, remote)")]
        source: Option<ResumeSourceKind>,

        #[arg(short, long, help = "Resume JSON file (implies --source file)")]
        path: Option<PathBuf>,

        #[arg(
            long,
            help = "Only print one section (about, skills, projects, experience, education, contact)"
        )]
        section: Option<String>,

        #[arg(
            short,
            long,
            default_value = "text",
            help = "Output format (text, json)"
        )]
        format: OutputFormat,
    },

    #[command(about = "Validate a contact message and print the mail link")]
    Contact {
        #[arg(short, long, default_value = "")]
        name: String,

        #[arg(short, long, default_value = "")]
        email: String,

        #[arg(short, long, default_value = "")]
        message: String,

        #[arg(long, help = "Recipient address (defaults to the resume's contact email)")]
        to: Option<String>,
    },

    #[command(about = "Check that the backend is reachable")]
    Status {
        #[arg(
            short,
            long,
            default_value = "text",
            help = "Output format (text, json)"
        )]
        format: OutputFormat,
    },

    #[command(about = "Show version information")]
    Version {
        #[arg(short, long)]
        detailed: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        api_url: cli.api_url.clone(),
        no_color: cli.no_color,
    };

    let config = match config::load(&overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    if !config.display.color {
        colored::control::set_override(false);
    }

    init_logging(cli.verbose, &config.logging);

    match run(cli, config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, logging: &LoggingConfig) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&logging.level))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let (plain, json) = if logging.json_format {
        (
            None,
            Some(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            ),
        )
    } else {
        (
            Some(fmt::layer().with_target(false).with_writer(std::io::stderr)),
            None,
        )
    };

    tracing_subscriber::registry()
        .with(plain)
        .with(json)
        .with(filter)
        .init();
}

async fn run(cli: Cli, config: FolioConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Chat { message } => cmd_chat(&config, message).await,
        Commands::Resume {
            source,
            path,
            section,
            format,
        } => {
            let config = config::with_resume_source(config, source, path)?;
            cmd_resume(&config, section.as_deref(), format).await
        }
        Commands::Contact {
            name,
            email,
            message,
            to,
        } => cmd_contact(&config, name, email, message, to).await,
        Commands::Status { format } => cmd_status(&config, format).await,
        Commands::Version { detailed } => cmd_version(detailed),
    }
}

async fn cmd_status(config: &FolioConfig, format: OutputFormat) -> anyhow::Result<()> {
    let client = ApiClient::from_config(&config.api);
    let result = client.health().await;

    if format == OutputFormat::Json {
        let output = match &result {
            Ok(health) => serde_json::json!({
                "api_url": client.base_url(),
                "reachable": true,
                "status": health.status,
                "service": health.service,
                "ai_configured": health.ai_configured,
            }),
            Err(e) => serde_json::json!({
                "api_url": client.base_url(),
                "reachable": false,
                "error_code": e.error_code(),
                "error": e.to_string(),
            }),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", "Folio Backend Status".cyan().bold());
        println!("{}", "═".repeat(40).dimmed());
        println!();
        println!("  {:<15} {}", "API URL:".bold(), client.base_url());

        match &result {
            Ok(health) => {
                let status = if health.is_healthy() {
                    health.status.green()
                } else {
                    health.status.yellow()
                };
                println!("  {:<15} {}", "Status:".bold(), status);
                if !health.service.is_empty() {
                    println!("  {:<15} {}", "Service:".bold(), health.service);
                }
                let assistant = if health.ai_configured {
                    "configured".green()
                } else {
                    "not configured".yellow()
                };
                println!("  {:<15} {}", "Assistant:".bold(), assistant);
            }
            Err(_) => {
                println!("  {:<15} {}", "Status:".bold(), "unreachable".red());
                println!();
            }
        }
    }

    match result {
        Ok(_) => Ok(()),
        Err(e) => Err(anyhow::anyhow!("{}", CliErrorDisplay::new(&e).to_string().trim_end())),
    }
}

fn cmd_version(detailed: bool) -> anyhow::Result<()> {
    if detailed {
        println!("{}", "Folio Version Information".cyan().bold());
        println!("{}", "═".repeat(40).dimmed());
        println!("  {:<15} {}", "Version:".bold(), VERSION);
        println!("  {:<15} {}", "Name:".bold(), NAME);
        println!("  {:<15} Apache-2.0", "License:".bold());
        println!();
        println!("  {}", "Backend Endpoints:".bold());
        println!("    POST /api/chat");
        println!("    GET  /api/resume");
        println!("    GET  /api/health");
        println!();
        println!("  {}", "Build Information:".bold());
        println!("    Rust Edition: 2021");
        #[cfg(debug_assertions)]
        println!("    Build:        Debug");
        #[cfg(not(debug_assertions))]
        println!("    Build:        Release");
    } else {
        println!("folio {}", VERSION);
    }

    Ok(())
}
