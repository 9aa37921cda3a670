//! Command-line surface for the trade reputation service.
//!
//! Wires config, logging, the database pool, and the engines together, and
//! exposes one subcommand per action. Mutating commands act as the user
//! passed via `--user`.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use trade_social_core::config::AppConfig;
use trade_social_core::config_loader::ConfigLoader;
use trade_social_core::identity::SessionIdentity;
use trade_social_core::validation::TradeDraft;
use trade_social_data::database;
use trade_social_data::postgres::Repositories;
use trade_social_service::{
    AggregationReader, CommentGuard, LikeToggle, RankingReader, RatingEngine, TradeService,
};

#[derive(Parser)]
#[command(name = "trade-social")]
#[command(about = "Social trade feed and reputation engine", long_about = None)]
struct Cli {
    /// Acting user id for mutations and per-viewer reads
    #[arg(long, global = true)]
    user: Option<Uuid>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the trade feed with aggregates
    Feed {
        #[arg(long, default_value_t = 20)]
        limit: i64,
        #[arg(long, default_value_t = 0)]
        offset: i64,
    },
    /// Show a single trade with stats, comments, and your rating/like state
    Trade { id: Uuid },
    /// Submit a new trade
    Submit {
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Update an owned trade
    Update {
        id: Uuid,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Delete an owned trade
    Delete { id: Uuid },
    /// Rate a trade 1-5 (creates or replaces your rating)
    Rate { trade_id: Uuid, value: f64 },
    /// Remove one of your ratings
    Unrate { rating_id: Uuid },
    /// Toggle your like on a trade
    Like { trade_id: Uuid },
    /// Comment on a trade
    Comment { trade_id: Uuid, content: String },
    /// Remove one of your comments
    Uncomment { comment_id: Uuid },
    /// Show the leaderboard
    Rankings {
        #[arg(long, default_value_t = 25)]
        limit: i64,
    },
    /// Show a profile with stats and trades
    Profile { username: String },
}

/// Trade form fields, passed through the validator untouched.
#[derive(clap::Args)]
struct DraftArgs {
    #[arg(long)]
    asset_pair: String,
    #[arg(long)]
    trade_type: String,
    #[arg(long)]
    entry_price: String,
    #[arg(long, default_value = "")]
    exit_price: String,
    #[arg(long, default_value = "")]
    position_size: String,
    #[arg(long)]
    strategy: String,
    #[arg(long, default_value = "")]
    notes: String,
    #[arg(long)]
    trade_date: String,
    #[arg(long, default_value = "")]
    status: String,
}

impl From<DraftArgs> for TradeDraft {
    fn from(args: DraftArgs) -> Self {
        Self {
            asset_pair: args.asset_pair,
            trade_type: args.trade_type,
            entry_price: args.entry_price,
            exit_price: args.exit_price,
            position_size: args.position_size,
            strategy: args.strategy,
            notes: args.notes,
            trade_date: args.trade_date,
            status: args.status,
        }
    }
}

/// Engines wired against the Postgres adapter.
struct App {
    trades: TradeService,
    ratings: RatingEngine,
    likes: LikeToggle,
    comments: CommentGuard,
    reader: AggregationReader,
    rankings: RankingReader,
}

impl App {
    fn new(config: &AppConfig, repos: Repositories, identity: SessionIdentity) -> Self {
        let identity = Arc::new(identity);
        let trades = Arc::new(repos.trades);
        let ratings = Arc::new(repos.ratings);
        let likes = Arc::new(repos.likes);
        let profiles = Arc::new(repos.profiles);

        Self {
            trades: TradeService::new(trades.clone(), identity.clone()),
            ratings: RatingEngine::new(ratings.clone(), identity.clone()),
            likes: LikeToggle::new(likes.clone(), identity.clone()),
            comments: CommentGuard::new(Arc::new(repos.comments), identity),
            reader: AggregationReader::new(
                trades,
                ratings,
                likes,
                profiles,
                config.feed.clone(),
            ),
            rankings: RankingReader::new(Arc::new(repos.rankings), config.feed.clone()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ConfigLoader::load()?;
    let pool = database::connect(&config.database).await?;
    let repos = Repositories::new(pool);

    let identity = match cli.user {
        Some(user) => SessionIdentity::authenticated(user),
        None => SessionIdentity::anonymous(),
    };
    let app = App::new(&config, repos, identity);

    match cli.command {
        Commands::Feed { limit, offset } => {
            let feed = app.reader.feed(limit, offset).await?;
            print_json(&feed)?;
        }
        Commands::Trade { id } => {
            run_trade_view(&app, id).await?;
        }
        Commands::Submit { draft } => {
            let trade = app.trades.submit(&draft.into()).await?;
            print_json(&trade)?;
        }
        Commands::Update { id, draft } => {
            let trade = app.trades.update(id, &draft.into()).await?;
            print_json(&trade)?;
        }
        Commands::Delete { id } => {
            app.trades.delete(id).await?;
            print_json(&serde_json::json!({ "deleted": id }))?;
        }
        Commands::Rate { trade_id, value } => {
            let rating = app.ratings.upsert_rating(trade_id, value).await?;
            print_json(&rating)?;
        }
        Commands::Unrate { rating_id } => {
            app.ratings.remove_rating(rating_id).await?;
            print_json(&serde_json::json!({ "removed": rating_id }))?;
        }
        Commands::Like { trade_id } => {
            let state = app.likes.toggle(trade_id).await?;
            print_json(&serde_json::json!({ "liked": state.liked }))?;
        }
        Commands::Comment { trade_id, content } => {
            let comment = app.comments.add(trade_id, &content).await?;
            print_json(&comment)?;
        }
        Commands::Uncomment { comment_id } => {
            app.comments.remove(comment_id).await?;
            print_json(&serde_json::json!({ "removed": comment_id }))?;
        }
        Commands::Rankings { limit } => {
            let rankings = app.rankings.top_users(limit).await?;
            print_json(&rankings)?;
        }
        Commands::Profile { username } => {
            run_profile_view(&app, &username).await?;
        }
    }

    Ok(())
}

async fn run_trade_view(app: &App, trade_id: Uuid) -> Result<()> {
    let Some(view) = app.reader.trade_view(trade_id).await? else {
        anyhow::bail!("trade {trade_id} not found");
    };
    let comments = app.comments.for_trade(trade_id).await?;
    let your_rating = app.ratings.rating_for(trade_id).await?;
    let liked = app.likes.like_for(trade_id).await?;

    print_json(&serde_json::json!({
        "trade": view,
        "comments": comments,
        "your_rating": your_rating,
        "liked": liked,
    }))
}

async fn run_profile_view(app: &App, username: &str) -> Result<()> {
    let Some(profile) = app.reader.profile_by_username(username).await? else {
        anyhow::bail!("no profile named {username}");
    };
    let stats = app.rankings.stats_for(profile.id).await?;
    let trades = app.reader.trades_for_user(profile.id, 50, 0).await?;

    print_json(&serde_json::json!({
        "profile": profile,
        "stats": stats,
        "trades": trades,
    }))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
