use clap::{Parser, Subcommand};
use vault_core::Config;

mod commands;

#[derive(Parser)]
#[command(name = "vault-cli", about = "File vault command-line client")]
struct Cli {
    /// Server URL to connect to (default: http://localhost:8080)
    #[arg(long, default_value = "http://localhost:8080")]
    server_url: String,

    /// User name for Basic authentication
    #[arg(long, env = "VAULT_USER", default_value = "admin")]
    user: String,

    /// Password for Basic authentication
    #[arg(long, env = "VAULT_PASS", default_value = "admin", hide_env_values = true)]
    pass: String,

    /// Read the metadata database directly instead of via HTTP.
    /// Only works when the server is NOT running (sled uses exclusive locks).
    #[arg(long)]
    offline: bool,

    /// Metadata directory for offline mode (overrides VAULT_METADATA_DIR)
    #[arg(long)]
    metadata_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a local file
    Upload {
        path: std::path::PathBuf,
        /// Object key (defaults to the file name)
        #[arg(long)]
        key: Option<String>,
    },
    /// Download an object
    Download {
        key: String,
        /// Output path (defaults to the key)
        #[arg(long, short)]
        output: Option<std::path::PathBuf>,
    },
    /// Delete an object
    Delete { key: String },
    /// List stored objects, newest first (offline only)
    List,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.offline {
        run_offline(cli);
    } else {
        run_online(cli).await;
    }
}

fn run_offline(cli: Cli) {
    let mut config = Config::from_env();
    if let Some(metadata_dir) = cli.metadata_dir {
        config.metadata_dir = metadata_dir.into();
    }

    let store = vault_core::storage::MetadataStore::open(&config.metadata_dir)
        .expect("Failed to open metadata store");

    match cli.command {
        Commands::List => commands::objects::list_offline(&store),
        _ => {
            eprintln!("Error: only `list` is available offline");
            std::process::exit(2);
        }
    }
}

async fn run_online(cli: Cli) {
    let remote = commands::objects::Remote {
        client: reqwest::Client::new(),
        base: cli.server_url.trim_end_matches('/').to_string(),
        user: cli.user,
        pass: cli.pass,
    };

    match cli.command {
        Commands::Upload { path, key } => {
            commands::objects::upload(&remote, &path, key.as_deref()).await
        }
        Commands::Download { key, output } => {
            commands::objects::download(&remote, &key, output.as_deref()).await
        }
        Commands::Delete { key } => commands::objects::delete(&remote, &key).await,
        Commands::List => {
            eprintln!("Error: `list` reads the metadata database; rerun with --offline");
            std::process::exit(2);
        }
    }
}
