//! # movie-board
//!
//! Loads the catalog into memory once, then answers a single query as JSON.

use std::path::PathBuf;

use anyhow::Context;
use auth_adapters::Argon2PasswordHasher;
use clap::{Args, Parser, Subcommand};
use configs::Settings;
use domains::{Actor, Director, Genre, MovieFilter, MovieRepository, Rank};
use serde::Serialize;
use services::movies;
use storage_adapters::MemoryMovieRepository;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "movie-board", version, about = "Browse the movie catalog")]
struct Cli {
    /// Overrides MOVIE_BOARD_DATA_PATH.
    #[arg(long, global = true)]
    data_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// The movies at a rank, with previous/next ranks and comments.
    Show { rank: Rank },
    /// Movies sharing a genre, actor or director.
    Filter(FilterArgs),
    /// A handful of random movies.
    Random {
        #[arg(default_value_t = 3)]
        count: usize,
    },
    /// Catalog totals.
    Stats,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct FilterArgs {
    #[arg(long)]
    genre: Option<String>,
    #[arg(long)]
    actor: Option<String>,
    #[arg(long)]
    director: Option<String>,
}

impl FilterArgs {
    fn into_filter(self) -> Option<MovieFilter> {
        self.genre
            .map(|g| MovieFilter::ByGenre(Genre::new(g)))
            .or_else(|| self.actor.map(|a| MovieFilter::ByActor(Actor::new(a))))
            .or_else(|| self.director.map(|d| MovieFilter::ByDirector(Director::new(d))))
    }
}

#[derive(Serialize)]
struct Stats<'a> {
    movies: usize,
    comments: usize,
    actors: usize,
    directors: usize,
    genres: Vec<String>,
    first: Option<&'a str>,
    last: Option<&'a str>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load().context("failed to load settings")?;
    if let Some(path) = cli.data_path {
        settings.data_path = path;
    }
    init_tracing(&settings);

    let mut repo = MemoryMovieRepository::new();
    let summary =
        storage_adapters::populate(&settings.data_path, &mut repo, &Argon2PasswordHasher::new())
            .with_context(|| {
                format!("failed to load catalog from {}", settings.data_path.display())
            })?;
    tracing::debug!(?summary, "repository ready");

    let output = match cli.command {
        Command::Show { rank } => {
            serde_json::to_string_pretty(&movies::get_movies_by_rank(&repo, rank))?
        }
        Command::Filter(args) => {
            let filter = args
                .into_filter()
                .context("one of --genre, --actor or --director is required")?;
            serde_json::to_string_pretty(&movies::filter_movies(&repo, &filter))?
        }
        Command::Random { count } => {
            serde_json::to_string_pretty(&movies::get_random_movies(&repo, count))?
        }
        Command::Stats => serde_json::to_string_pretty(&Stats {
            movies: repo.get_movie_count(),
            comments: repo.get_comments().len(),
            actors: repo.get_actors().len(),
            directors: repo.get_directors().len(),
            genres: movies::get_genre_names(&repo),
            first: repo.get_first_movie().map(|m| m.title()),
            last: repo.get_last_movie().map(|m| m.title()),
        })?,
    };

    println!("{output}");
    Ok(())
}

fn init_tracing(settings: &Settings) {
    let filter =
        EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if settings.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}
