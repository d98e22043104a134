//! Shared fixtures for the end-to-end test targets.

use std::path::PathBuf;

use auth_adapters::Argon2PasswordHasher;
use chrono::{NaiveDate, NaiveDateTime};
use domains::{Movie, MovieRepository, Rank};
use storage_adapters::MemoryMovieRepository;

/// The sample catalog shipped in the workspace `data/` directory. It is a
/// cut-down sample: `Data1000Movies.csv` keeps the full catalog's file name
/// and columns but holds only the first 8 ranks.
pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

/// A repository populated from `data_dir()` with real Argon2 hashing.
pub fn loaded_repo() -> MemoryMovieRepository {
    let mut repo = MemoryMovieRepository::new();
    storage_adapters::populate(&data_dir(), &mut repo, &Argon2PasswordHasher::new())
        .expect("sample data should load");
    repo
}

/// A repository holding `count` synthetic movies with ranks `1..=count`,
/// inserted in a scrambled order.
pub fn ranked_repo(count: Rank) -> MemoryMovieRepository {
    let mut repo = MemoryMovieRepository::new();
    // 7919 is prime; for counts it does not divide, this visits every rank once.
    for i in 0..count {
        let rank = (i * 7919) % count + 1;
        repo.add_movie(Movie::new(rank, format!("Movie {rank}"), 1990 + (rank % 30) as i32));
    }
    repo
}

pub fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 3, 2)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid fixed timestamp")
}
