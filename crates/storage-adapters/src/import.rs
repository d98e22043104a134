//! # CSV bulk loader
//!
//! Populates a `MovieRepository` from the catalog, user and comment files in
//! that order. Comments depend on both earlier loads.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use domains::{
    make_comment, Actor, Director, DomainError, Genre, Movie, MovieRepository, PasswordHasher,
    Rank, User,
};
use thiserror::Error;

pub const MOVIES_FILE: &str = "Data1000Movies.csv";
pub const USERS_FILE: &str = "users.csv";
pub const COMMENTS_FILE: &str = "comments.csv";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: invalid {field} {value:?}")]
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: unknown user id {user_id:?}")]
    UnknownUser { line: u64, user_id: String },

    #[error("line {line}: no movie with rank {rank}")]
    UnknownMovie { line: u64, rank: Rank },

    #[error("line {line}: user name {user_name:?} is already registered")]
    DuplicateUser { line: u64, user_name: String },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{file}: {source}")]
    InFile {
        file: &'static str,
        #[source]
        source: Box<LoadError>,
    },
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// Counts of what `populate` loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub movies: usize,
    pub users: usize,
    pub comments: usize,
}

/// Loads the three data files found under `data_path`.
pub fn populate(
    data_path: &Path,
    repo: &mut dyn MovieRepository,
    hasher: &dyn PasswordHasher,
) -> Result<LoadSummary> {
    let movies =
        load_movies(open(&data_path.join(MOVIES_FILE))?, repo).map_err(in_file(MOVIES_FILE))?;
    let users = load_users(open(&data_path.join(USERS_FILE))?, repo, hasher)
        .map_err(in_file(USERS_FILE))?;
    let comments = load_comments(open(&data_path.join(COMMENTS_FILE))?, repo, &users)
        .map_err(in_file(COMMENTS_FILE))?;

    let summary = LoadSummary {
        movies,
        users: users.len(),
        comments,
    };
    tracing::info!(
        movies = summary.movies,
        users = summary.users,
        comments = summary.comments,
        path = %data_path.display(),
        "catalog loaded"
    );
    Ok(summary)
}

/// Catalog rows: rank, title, genres, description, director, actors, year,
/// duration, rating, votes, revenue, metascore. Returns the row count.
pub fn load_movies<R: io::Read>(source: R, repo: &mut dyn MovieRepository) -> Result<usize> {
    let mut count = 0;
    for record in reader(source).records() {
        let record = record?;
        let line = line_of(&record);

        let rank: Rank = parse(&record, 0, "rank")?;
        if rank == 0 {
            return Err(LoadError::InvalidField {
                line,
                field: "rank",
                value: "0".into(),
            });
        }

        let mut movie = Movie::new(rank, field(&record, 1, "title")?, parse(&record, 6, "year")?)
            .with_description(field(&record, 3, "description")?)
            .with_rating(parse(&record, 8, "rating")?)
            .with_votes(parse(&record, 9, "votes")?)
            .with_revenue(parse_optional(&record, 10, "revenue")?)
            .with_metascore(parse_optional(&record, 11, "metascore")?)?;
        movie.set_duration(parse(&record, 7, "duration")?)?;

        let director = field(&record, 4, "director")?;
        if !director.is_empty() {
            let director = Director::new(director);
            repo.add_director(director.clone());
            movie.set_director(director);
        }
        for name in split_list(field(&record, 5, "actors")?) {
            let actor = Actor::new(name);
            repo.add_actor(actor.clone());
            movie.add_actor(actor);
        }
        for name in split_list(field(&record, 2, "genres")?) {
            let genre = Genre::new(name);
            repo.add_genre(genre.clone());
            movie.add_genre(genre);
        }

        repo.add_movie(movie);
        count += 1;
    }

    tracing::debug!(count, "movies loaded");
    Ok(count)
}

/// User rows: external id, username, plaintext password. Returns the
/// external id → normalized user name map needed by the comment file.
/// Two rows whose names normalize to the same key fail the load.
pub fn load_users<R: io::Read>(
    source: R,
    repo: &mut dyn MovieRepository,
    hasher: &dyn PasswordHasher,
) -> Result<HashMap<String, String>> {
    let mut users = HashMap::new();
    for record in reader(source).records() {
        let record = record?;
        let id = field(&record, 0, "user id")?;
        let user_name = User::normalize_name(field(&record, 1, "username")?);
        if repo.get_user(&user_name).is_some() {
            return Err(LoadError::DuplicateUser {
                line: line_of(&record),
                user_name,
            });
        }
        let password_hash = hasher.hash_password(field(&record, 2, "password")?)?;
        let user = User::new(&user_name, password_hash);

        users.insert(id.to_string(), user.user_name().to_string());
        repo.add_user(user);
    }

    tracing::debug!(count = users.len(), "users loaded");
    Ok(users)
}

/// Comment rows: id, external user id, movie rank, text, timestamp. Every
/// comment is attached to both sides before it goes through the gate.
pub fn load_comments<R: io::Read>(
    source: R,
    repo: &mut dyn MovieRepository,
    users: &HashMap<String, String>,
) -> Result<usize> {
    let mut count = 0;
    for record in reader(source).records() {
        let record = record?;
        let line = line_of(&record);

        let user_id = field(&record, 1, "user id")?;
        let user_name = users.get(user_id).ok_or_else(|| LoadError::UnknownUser {
            line,
            user_id: user_id.to_string(),
        })?;
        let rank: Rank = parse(&record, 2, "movie rank")?;
        let text = field(&record, 3, "comment")?;
        let timestamp = parse_timestamp(field(&record, 4, "timestamp")?).ok_or_else(|| {
            LoadError::InvalidField {
                line,
                field: "timestamp",
                value: record.get(4).unwrap_or_default().to_string(),
            }
        })?;

        if repo.get_movie(rank).is_none() {
            return Err(LoadError::UnknownMovie { line, rank });
        }
        let (user, movie) =
            repo.comment_targets_mut(user_name, rank)
                .ok_or_else(|| LoadError::UnknownUser {
                    line,
                    user_id: user_id.to_string(),
                })?;
        let comment = make_comment(text, user, movie, timestamp);
        repo.add_comment(comment)?;
        count += 1;
    }

    tracing::debug!(count, "comments loaded");
    Ok(count)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn in_file(file: &'static str) -> impl FnOnce(LoadError) -> LoadError {
    move |source| LoadError::InFile {
        file,
        source: Box::new(source),
    }
}

fn reader<R: io::Read>(source: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(source)
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}

fn field<'r>(record: &'r StringRecord, index: usize, name: &'static str) -> Result<&'r str> {
    record.get(index).ok_or_else(|| LoadError::InvalidField {
        line: line_of(record),
        field: name,
        value: String::new(),
    })
}

fn parse<T: FromStr>(record: &StringRecord, index: usize, name: &'static str) -> Result<T> {
    let raw = field(record, index, name)?;
    raw.parse().map_err(|_| LoadError::InvalidField {
        line: line_of(record),
        field: name,
        value: raw.to_string(),
    })
}

/// Empty and "N/A" are absent.
fn parse_optional<T: FromStr>(
    record: &StringRecord,
    index: usize,
    name: &'static str,
) -> Result<Option<T>> {
    match field(record, index, name)? {
        "" | "N/A" => Ok(None),
        _ => parse(record, index, name).map(Some),
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|name| !name.is_empty())
}

/// Accepts `YYYY-MM-DD HH:MM:SS`, the `T`-separated form (optionally with
/// fractional seconds) and a bare date at midnight.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    raw.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            raw.parse::<NaiveDate>()
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
