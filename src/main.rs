//! CLI entry point for mdpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mdpress")]
#[command(version)]
#[command(about = "Index, render and list markdown posts with YAML front-matter", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Collection to create the post in
        #[arg(short, long)]
        collection: Option<String>,

        /// Category written to the front-matter
        #[arg(long)]
        category: Option<String>,
    },

    /// Print one listing page
    List {
        #[arg(short, long)]
        collection: Option<String>,

        /// Only posts in this category (case-insensitive)
        #[arg(long)]
        category: Option<String>,

        /// Page to show, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Print the categories of a collection
    Categories {
        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Render one post to stdout
    Render {
        /// Slug of the post (file name without `.md`)
        slug: String,

        #[arg(short, long)]
        collection: Option<String>,

        /// Print the full record as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Generate the static export
    #[command(alias = "g")]
    Generate,

    /// Clean the public folder
    Clean,

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdpress=debug,info"
    } else {
        "mdpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            mdpress::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            title,
            collection,
            category,
        } => {
            let site = mdpress::Site::new(&base_dir)?;
            let path = mdpress::commands::new::create_post(
                &site,
                &title,
                collection.as_deref(),
                category.as_deref(),
            )?;
            println!("Created {:?}", path);
        }

        Commands::List {
            collection,
            category,
            page,
        } => {
            let site = mdpress::Site::new(&base_dir)?;
            mdpress::commands::list::run(&site, collection.as_deref(), category.as_deref(), page)?;
        }

        Commands::Categories { collection } => {
            let site = mdpress::Site::new(&base_dir)?;
            mdpress::commands::categories::run(&site, collection.as_deref())?;
        }

        Commands::Render {
            slug,
            collection,
            json,
        } => {
            let site = mdpress::Site::new(&base_dir)?;
            mdpress::commands::render::run(&site, collection.as_deref(), &slug, json)?;
        }

        Commands::Generate => {
            let site = mdpress::Site::new(&base_dir)?;
            tracing::info!("Generating static export...");
            let report = site.generate()?;
            println!(
                "Generated {} posts and {} listing pages",
                report.posts, report.listing_pages
            );
        }

        Commands::Clean => {
            let site = mdpress::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Server { port, ip } => {
            let site = mdpress::Site::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            mdpress::server::start(&site, &ip, port).await?;
        }

        Commands::Version => {
            println!("mdpress version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
