use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use newsai::display;
use newsai::feed::{
    refresh_loop, ArticleList, Category, CategoryFilter, FeedClient, DEFAULT_POLL_INTERVAL,
};
use std::{env, process};
use tokio::signal;
use tokio::sync::{mpsc, watch};
use tokio::time::Duration;
use tracing::error;

#[derive(Parser)]
#[clap(name = "newsai", about = "Terminal client for the AI news portal")]
struct Cli {
    /// Read endpoint URL (overrides NEWSAI_READ_URL)
    #[clap(long)]
    read_url: Option<String>,

    /// Generate endpoint URL (overrides NEWSAI_GENERATE_URL)
    #[clap(long)]
    generate_url: Option<String>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List articles, optionally filtered
    List {
        /// Category to show ("all" or a category name)
        #[clap(short, long, default_value = "all")]
        category: CategoryFilter,

        /// Search text matched against titles and content
        #[clap(short, long, default_value = "")]
        search: String,
    },

    /// Show one article in full
    Show {
        /// Article ID
        #[clap(required = true)]
        id: i64,
    },

    /// Request generation of a new article
    Generate {
        /// Category for the new article (server picks when omitted)
        #[clap(short, long)]
        category: Option<Category>,
    },

    /// Poll the portal and re-render the listing on every refresh
    Watch {
        /// Category to show ("all" or a category name)
        #[clap(short, long, default_value = "all")]
        category: CategoryFilter,

        /// Search text matched against titles and content
        #[clap(short, long, default_value = "")]
        search: String,

        /// Seconds between refreshes
        #[clap(short, long, default_value = "30")]
        interval: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    newsai::logging::configure_logging();

    // Parse command line arguments
    let args = Cli::parse();

    let read_url = resolve_endpoint(args.read_url, "NEWSAI_READ_URL")?;
    let generate_url = resolve_endpoint(args.generate_url, "NEWSAI_GENERATE_URL")?;
    let client = FeedClient::new(&read_url, &generate_url)?;
    let mut list = ArticleList::new(client);

    match args.command {
        Commands::List { category, search } => {
            run_list(&mut list, category, &search).await?;
        }
        Commands::Show { id } => {
            run_show(&mut list, id).await?;
        }
        Commands::Generate { category } => {
            run_generate(&mut list, category).await;
        }
        Commands::Watch {
            category,
            search,
            interval,
        } => {
            run_watch(list, category, &search, interval).await;
        }
    }

    Ok(())
}

fn resolve_endpoint(flag: Option<String>, var: &str) -> Result<String> {
    match flag {
        Some(url) => Ok(url),
        None => env::var(var)
            .map_err(|_| anyhow::anyhow!("no endpoint configured: pass a flag or set {}", var)),
    }
}

async fn run_list(list: &mut ArticleList, category: CategoryFilter, search: &str) -> Result<()> {
    list.set_category(category);
    list.set_search_query(search);
    let total = list.refresh().await?;

    let filtered = list.filtered();
    if filtered.is_empty() {
        println!("{}", "No articles match the current filters".bright_yellow());
    } else {
        display::article_table(&filtered).printstd();
    }
    println!("{} of {} articles", filtered.len(), total);

    Ok(())
}

async fn run_show(list: &mut ArticleList, id: i64) -> Result<()> {
    list.refresh().await?;

    match list.find(id) {
        Some(article) => {
            display::print_article(article);
            Ok(())
        }
        None => {
            eprintln!("{}", format!("Article {} not found", id).bright_red());
            process::exit(1);
        }
    }
}

async fn run_generate(list: &mut ArticleList, category: Option<Category>) {
    match list.generate(category).await {
        Ok(generated) => {
            println!(
                "{}",
                format!(
                    "Generated: {} ({} words)",
                    generated.title, generated.word_count
                )
                .bright_green()
            );
        }
        Err(err) => {
            eprintln!("{}", format!("Generation failed: {}", err).bright_red());
            process::exit(1);
        }
    }
}

async fn run_watch(mut list: ArticleList, category: CategoryFilter, search: &str, interval: u64) {
    list.set_category(category);
    list.set_search_query(search);

    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_err() {
            error!("Failed to listen for ctrl-c");
        }
        let _ = cancel_tx.send(true);
    });

    let interval = if interval == 0 {
        DEFAULT_POLL_INTERVAL
    } else {
        Duration::from_secs(interval)
    };

    let (snap_tx, mut snap_rx) = mpsc::channel(4);
    let loop_handle = tokio::spawn(refresh_loop(list, interval, cancel_rx, snap_tx));

    while let Some(snapshot) = snap_rx.recv().await {
        if snapshot.is_empty() {
            println!("{}", "No articles match the current filters".bright_yellow());
        } else {
            let refs: Vec<&_> = snapshot.iter().collect();
            display::article_table(&refs).printstd();
        }
        println!(
            "{} articles, refreshing every {}s (ctrl-c to stop)",
            snapshot.len(),
            interval.as_secs()
        );
    }

    let _ = loop_handle.await;
}
