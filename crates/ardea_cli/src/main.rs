use ardea_client::AssetsClient;
use ardea_core::prelude::*;
use ardea_webhook::{WebhookHandler, WebhookServer};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ardea")]
#[command(about = "CLI for the Assets server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Server URL
    #[arg(short, long, env = "ASSETS_URL", default_value = "http://localhost:9090")]
    url: String,

    #[arg(long, env = "ASSETS_USERNAME")]
    username: Option<String>,

    #[arg(long, env = "ASSETS_PASSWORD")]
    password: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long)]
    insecure: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search assets
    Search {
        /// Query, e.g. "assetType:image"
        q: String,

        /// Number of hits to return
        #[arg(short, long, default_value_t = 50)]
        num: u32,
    },
    /// List a folder's contents
    Browse {
        path: String,
    },
    /// Download an asset's original file by id
    Download {
        asset_id: String,

        /// Target path; a temp file when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create a folder
    CreateFolder {
        path: String,
    },
    /// Show the authenticated user's profile
    Profile,
    /// Run the webhook listener and print incoming events
    Listen {
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,

        #[arg(short, long, default_value_t = 3000)]
        port: u16,

        /// Shared secret of the webhook registration
        #[arg(long, env = "ASSETS_WEBHOOK_SECRET")]
        secret: String,
    },
}

struct PrintHandler;

impl WebhookHandler for PrintHandler {
    fn on_event(&self, payload: WebhookPayload) {
        match serde_json::to_string_pretty(&payload) {
            Ok(json) => println!("📥 {json}"),
            Err(_) => println!("📥 {} on {}", payload.event_type, payload.asset_id),
        }
    }

    fn on_error(&self, message: String) {
        eprintln!("⚠️ {message}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let command = match cli.command {
        Commands::Listen { bind, port, secret } => {
            let server = WebhookServer::new(WebhookConfig::new(bind, port, secret));
            let listener = server.serve(PrintHandler).await?;
            println!(
                "Listening for webhooks on {} (ctrl-c to stop)",
                listener.local_addr()
            );
            tokio::signal::ctrl_c().await?;
            listener.stop().await?;
            return Ok(());
        }
        command => command,
    };

    let username = cli
        .username
        .ok_or_else(|| anyhow::anyhow!("Missing --username (or ASSETS_USERNAME)"))?;
    let password = cli
        .password
        .ok_or_else(|| anyhow::anyhow!("Missing --password (or ASSETS_PASSWORD)"))?;

    let mut config = AssetsConfig::new(cli.url, username, password);
    config.reject_unauthorized = !cli.insecure;
    let client = AssetsClient::new(config)?;

    match command {
        Commands::Search { q, num } => {
            let mut req = SearchRequest::new(q);
            req.num = num;
            let results = client.search(&req).await?;
            println!("{} hits (showing {})", results.total_hits, results.hits.len());
            for hit in results.hits {
                let path = hit
                    .metadata
                    .get("assetPath")
                    .and_then(|v| v.as_str())
                    .unwrap_or("<no path>");
                println!("  {}  {path}", hit.id);
            }
        }
        Commands::Browse { path } => {
            let entries = client.browse(&BrowseRequest::new(path)).await?;
            for entry in entries {
                let marker = if entry.directory { "/" } else { "" };
                println!("{}{marker}", entry.asset_path);
            }
        }
        Commands::Download { asset_id, output } => {
            let downloaded = client.download_from_id(&asset_id, None).await?;
            let path = match output {
                Some(target) => {
                    if let Some(parent) = target.parent() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                    tokio::fs::copy(&downloaded, &target).await?;
                    target
                }
                None => downloaded,
            };
            println!("✅ Saved to {path:?}");
        }
        Commands::CreateFolder { path } => {
            let result = client.create_folder(&path).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Profile => {
            let profile = client.profile().await?;
            println!("{} ({})", profile.username, profile.full_name.unwrap_or_default());
            println!("groups: {}", profile.groups.join(", "));
        }
        Commands::Listen { .. } => unreachable!("handled above"),
    }

    Ok(())
}
