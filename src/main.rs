use std::time::Duration;

use cbs_catalog::client::{CBS_API_URL, DEFAULT_CONCURRENCY, DEFAULT_USER_AGENT, path_id};
use cbs_catalog::output::format_catalogs;
use cbs_catalog::{Catalog, CatalogClient, CatalogConfig, Lang};
use clap::{Parser, Subcommand, ValueEnum};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Language {
    En,
    He,
}

impl From<Language> for Lang {
    fn from(lang: Language) -> Self {
        match lang {
            Language::En => Lang::En,
            Language::He => Lang::He,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "cbs-catalog")]
#[command(about = "Browse the CBS series catalog", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Response language
    #[arg(long, global = true, default_value = "en")]
    lang: Language,

    /// Items per page (the API allows at most 1000)
    #[arg(long, global = true, default_value = "100")]
    page_size: u32,

    /// Maximum concurrent page requests when fetching all pages
    #[arg(long, global = true, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout_secs: u64,

    /// API root URL
    #[arg(long, global = true, default_value = CBS_API_URL)]
    base_url: String,

    /// Print JSON instead of a markdown list
    #[arg(long, global = true, default_value = "false")]
    json: bool,

    /// Log level
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List subjects at a level (1-5)
    Level {
        level: u8,

        /// Parent subject, required for levels above 1
        #[arg(short, long)]
        subject: Option<u32>,

        /// Fetch every page, not just the first
        #[arg(short, long)]
        all_pages: bool,
    },
    /// List subjects under a comma-separated path, e.g. 2,1,1
    Path {
        #[arg(value_delimiter = ',', required = true)]
        path: Vec<u32>,

        /// Fetch every page, not just the first
        #[arg(short, long)]
        all_pages: bool,
    },
    /// Find subjects whose name or description contains a phrase
    Find {
        phrase: String,

        /// Subject to search below
        #[arg(short, long)]
        subject: u32,

        /// Levels to search (default 2,3,4,5)
        #[arg(long, value_delimiter = ',')]
        levels: Vec<u8>,
    },
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("cbs_catalog={}", args.log_level).parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CatalogConfig::builder()
        .lang(args.lang.into())
        .page_size(args.page_size)
        .concurrency(args.concurrency)
        .timeout(Some(Duration::from_secs(args.timeout_secs)))
        .build();
    let client = CatalogClient::with_base_url(DEFAULT_USER_AGENT, config, &args.base_url)?;

    let token = client.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling requests");
            token.cancel();
        }
    });

    tracing::info!(command = ?args.command, base_url = %args.base_url, "querying catalog");

    let (title, catalogs): (String, Vec<Catalog>) = match &args.command {
        Command::Level {
            level,
            subject,
            all_pages,
        } => {
            let title = match subject {
                Some(subject) => format!("Level {level} under subject {subject}"),
                None => format!("Level {level}"),
            };
            (
                title,
                client.query_by_level(*level, *subject, *all_pages).await?,
            )
        }
        Command::Path { path, all_pages } => (
            format!("Path {}", path_id(path)),
            client.query_by_path(path, *all_pages).await?,
        ),
        Command::Find {
            phrase,
            subject,
            levels,
        } => {
            let levels = (!levels.is_empty()).then_some(levels.as_slice());
            (
                format!("\"{phrase}\" under subject {subject}"),
                client.find_phrase_in_subject(phrase, *subject, levels).await?,
            )
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalogs)?);
    } else {
        print!("{}", format_catalogs(&title, &catalogs));
    }

    Ok(())
}
