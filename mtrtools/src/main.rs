use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;

mod backfill;
mod teams;

#[derive(Parser, Debug)]
#[command(version = "0.1.0", about = "Operator tools for the match tracker")]
pub struct Arguments {
    /// The database to operate on. Defaults to MTR_DATABASE_URL.
    #[arg(
        short = 'd',
        long = "database-url",
        env = "MTR_DATABASE_URL",
        default_value = "sqlite://data/match_tracker.db"
    )]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage teams and their aliases
    #[command(subcommand)]
    Team(TeamCommand),
    #[clap(name = "backfill", about = "Link unlinked teams to the fixture provider using fixtures from a date range")]
    Backfill(BackfillParams),
}

#[derive(Debug, Subcommand)]
pub enum TeamCommand {
    /// Create a team. The team's name is registered as an alias automatically.
    Add {
        name: String,
        /// Additional names the team is known by. May be repeated.
        #[arg(short = 'a', long = "alias")]
        aliases: Vec<String>,
        /// The fixture provider's id for the team
        #[arg(short = 'x', long = "external-id")]
        external_id: Option<i64>,
    },
    /// Look up the team an alias refers to
    Find { alias: String },
}

#[derive(Debug, Args)]
pub struct BackfillParams {
    /// First date to fetch fixtures for (YYYY-MM-DD)
    #[arg(short = 'f', long = "from")]
    from: NaiveDate,
    /// Last date to fetch fixtures for (YYYY-MM-DD), inclusive
    #[arg(short = 't', long = "to")]
    to: NaiveDate,
    /// Maximum number of dates fetched at the same time
    #[arg(short = 'c', long = "concurrency", default_value = "4")]
    concurrency: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    let db = teams::open_database(&cli.database_url).await?;
    match cli.command {
        Command::Team(TeamCommand::Add { name, aliases, external_id }) => {
            teams::add_team(db, &name, &aliases, external_id).await
        },
        Command::Team(TeamCommand::Find { alias }) => teams::find_team(db, &alias).await,
        Command::Backfill(params) => backfill::run_backfill(db, params).await,
    }
}
