use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shared_config::AppConfig;
use video_api_cell::models::{
    ArchiveMode, ListStreamCompositionsRequest, MediaMode, Role, TokenOptions,
};
use video_api_cell::{CreateSessionRequest, VideoClient};

#[derive(Parser, Debug)]
#[command(author, version, about = "Command-line access to the video API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new session and print its id
    CreateSession {
        /// Relay media peer to peer instead of through the media router
        #[arg(long)]
        relayed: bool,

        /// Record the session automatically
        #[arg(long)]
        archive_always: bool,

        /// IP address hint used to pick the media server
        #[arg(long)]
        location: Option<String>,
    },
    /// Sign a client token for a session
    Token {
        session_id: String,

        #[arg(value_enum, default_value_t = RoleArg::Publisher)]
        role: RoleArg,

        /// Connection data attached to the token
        #[arg(long)]
        data: Option<String>,
    },
    /// List archives, optionally for one session
    ListArchives {
        session_id: Option<String>,

        #[arg(long, default_value_t = 50)]
        count: i64,
    },
    /// Stop a running archive
    StopArchive { archive_id: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RoleArg {
    Subscriber,
    Publisher,
    PublisherOnly,
    Moderator,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Subscriber => Role::Subscriber,
            RoleArg::Publisher => Role::Publisher,
            RoleArg::PublisherOnly => Role::PublisherOnly,
            RoleArg::Moderator => Role::Moderator,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn,video_api_cell=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::from_env();
    let client = VideoClient::new(&config).context("Video API client could not be created")?;

    info!("Using video application {}", client.application_id());

    match cli.command {
        Command::CreateSession {
            relayed,
            archive_always,
            location,
        } => {
            let mut builder = CreateSessionRequest::builder().media_mode(if relayed {
                MediaMode::Relayed
            } else {
                MediaMode::Routed
            });
            if archive_always {
                builder = builder.archive_mode(ArchiveMode::Always);
            }
            if let Some(location) = location {
                builder = builder.location(location);
            }

            let session = client.create_session(&builder.build()?).await?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        Command::Token {
            session_id,
            role,
            data,
        } => {
            let mut builder = TokenOptions::builder().role(role.into());
            if let Some(data) = data {
                builder = builder.data(data);
            }

            let token = client.generate_token(&session_id, &builder.build()?)?;
            println!("{}", token);
        }
        Command::ListArchives { session_id, count } => {
            let mut builder = ListStreamCompositionsRequest::builder().count(count);
            if let Some(session_id) = session_id {
                builder = builder.session_id(session_id);
            }

            let archives = client.list_archives_with(&builder.build()?).await?;
            println!("{}", serde_json::to_string_pretty(&archives)?);
        }
        Command::StopArchive { archive_id } => {
            let archive = client.stop_archive(&archive_id).await?;
            println!("{}", serde_json::to_string_pretty(&archive)?);
        }
    }

    Ok(())
}
