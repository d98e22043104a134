//! # Domain Models
//!
//! These structs represent the core entities of the movie board.
//!
//! A `Movie` carries two identities. Its `rank` is the sort key and primary
//! key used by the ordered store, while equality and hashing use
//! `(title, year)`. The two never share an operator: ordering goes through
//! [`Movie::rank_order`], membership through `PartialEq`/`Hash`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{DomainError, Result};

/// A movie's position in the popularity ordering. 1-based in catalog data.
pub type Rank = u32;

/// Generates a name-identified value object (actor, genre, director).
macro_rules! named_entity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Builds the entity from a raw name, trimming surrounding whitespace.
            pub fn new(name: impl AsRef<str>) -> Self {
                Self(name.as_ref().trim().to_string())
            }

            pub fn name(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

named_entity!(
    /// A cast member, identified by name.
    Actor
);
named_entity!(
    /// A genre label such as "Sci-Fi".
    Genre
);
named_entity!(
    /// A director, identified by name.
    Director
);

/// A catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct Movie {
    rank: Rank,
    title: String,
    description: Option<String>,
    year: i32,
    /// Runtime in minutes
    duration: u32,
    rating: f32,
    votes: u64,
    /// Box office revenue in millions, absent when the catalog says "N/A"
    revenue: Option<f64>,
    /// 0..=100, absent when unknown
    metascore: Option<u8>,
    director: Option<Director>,
    actors: Vec<Actor>,
    genres: Vec<Genre>,
    comments: Vec<Comment>,
}

impl Movie {
    /// Creates a movie with only its keys set. `rank`, `title` and `year`
    /// cannot change afterwards since they back the store index and the
    /// equality hash.
    pub fn new(rank: Rank, title: impl AsRef<str>, year: i32) -> Self {
        Self {
            rank,
            title: title.as_ref().trim().to_string(),
            description: None,
            year,
            duration: 0,
            rating: 0.0,
            votes: 0,
            revenue: None,
            metascore: None,
            director: None,
            actors: Vec::new(),
            genres: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl AsRef<str>) -> Self {
        self.set_description(description);
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = minutes;
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_votes(mut self, votes: u64) -> Self {
        self.votes = votes;
        self
    }

    pub fn with_revenue(mut self, revenue: Option<f64>) -> Self {
        self.revenue = revenue;
        self
    }

    pub fn with_metascore(mut self, metascore: Option<u8>) -> Result<Self> {
        self.set_metascore(metascore)?;
        Ok(self)
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Blank descriptions are stored as absent.
    pub fn set_description(&mut self, description: impl AsRef<str>) {
        let trimmed = description.as_ref().trim();
        self.description = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Accepts a signed minute count so callers holding unchecked input get
    /// a validation error instead of a silent wrap.
    pub fn set_duration(&mut self, minutes: i64) -> Result<()> {
        self.duration = u32::try_from(minutes).map_err(|_| {
            DomainError::Validation(format!("duration must be non-negative, got {minutes}"))
        })?;
        Ok(())
    }

    pub fn rating(&self) -> f32 {
        self.rating
    }

    pub fn votes(&self) -> u64 {
        self.votes
    }

    pub fn revenue(&self) -> Option<f64> {
        self.revenue
    }

    pub fn metascore(&self) -> Option<u8> {
        self.metascore
    }

    pub fn set_metascore(&mut self, metascore: Option<u8>) -> Result<()> {
        if let Some(score) = metascore.filter(|score| *score > 100) {
            return Err(DomainError::Validation(format!(
                "metascore must be within 0..=100, got {score}"
            )));
        }
        self.metascore = metascore;
        Ok(())
    }

    pub fn director(&self) -> Option<&Director> {
        self.director.as_ref()
    }

    pub fn set_director(&mut self, director: Director) {
        self.director = Some(director);
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Appends the actor unless already listed. Returns whether it was added.
    pub fn add_actor(&mut self, actor: Actor) -> bool {
        if self.actors.contains(&actor) {
            return false;
        }
        self.actors.push(actor);
        true
    }

    pub fn remove_actor(&mut self, actor: &Actor) {
        self.actors.retain(|a| a != actor);
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    /// Appends the genre unless already listed. Returns whether it was added.
    pub fn add_genre(&mut self, genre: Genre) -> bool {
        if self.genres.contains(&genre) {
            return false;
        }
        self.genres.push(genre);
        true
    }

    pub fn remove_genre(&mut self, genre: &Genre) {
        self.genres.retain(|g| g != genre);
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    pub fn number_of_comments(&self) -> usize {
        self.comments.len()
    }

    /// Ordering key used by the ranked store.
    pub fn rank_order(&self, other: &Movie) -> Ordering {
        self.rank.cmp(&other.rank)
    }

    /// Equality key used for set/map membership.
    pub fn identity_key(&self) -> (&str, i32) {
        (&self.title, self.year)
    }
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.identity_key() == other.identity_key()
    }
}

impl Eq for Movie {}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity_key().hash(state);
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Movie {}, {}>", self.title, self.year)
    }
}

/// A registered account. Passwords arrive already hashed.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    user_name: String,
    #[serde(skip_serializing)]
    password: String,
    watched_movies: Vec<Rank>,
    comments: Vec<Comment>,
    watched_minutes: u64,
}

impl User {
    pub fn new(user_name: impl AsRef<str>, password_hash: impl Into<String>) -> Self {
        Self {
            user_name: Self::normalize_name(user_name.as_ref()),
            password: password_hash.into(),
            watched_movies: Vec::new(),
            comments: Vec::new(),
            watched_minutes: 0,
        }
    }

    /// The canonical key form of a user name: trimmed and lowercased.
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn watched_movies(&self) -> &[Rank] {
        &self.watched_movies
    }

    pub fn watched_minutes(&self) -> u64 {
        self.watched_minutes
    }

    /// Records a viewing. Rewatching the same movie is not counted twice.
    pub fn watch_movie(&mut self, movie: &Movie) {
        if self.watched_movies.contains(&movie.rank()) {
            return;
        }
        self.watched_movies.push(movie.rank());
        self.watched_minutes += u64::from(movie.duration());
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.user_name == other.user_name
    }
}

impl Eq for User {}

impl PartialOrd for User {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for User {
    fn cmp(&self, other: &Self) -> Ordering {
        self.user_name.cmp(&other.user_name)
    }
}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.user_name.hash(state);
    }
}

/// A review left by a user on a movie.
///
/// Back-references are held as keys (user name, movie rank). A comment is
/// only admissible by the repository once it also sits in both the user's
/// and the movie's comment lists; see [`make_comment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    user: Option<String>,
    movie: Option<Rank>,
    text: String,
    timestamp: NaiveDateTime,
}

impl Comment {
    /// Builds an unattached comment. Neither side's list is touched.
    pub fn new(
        user: Option<&User>,
        movie: Option<&Movie>,
        text: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            user: user.map(|u| u.user_name().to_string()),
            movie: movie.map(Movie::rank),
            text: text.into(),
            timestamp,
        }
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn movie_rank(&self) -> Option<Rank> {
        self.movie
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

/// Builds a comment and links it to both its user and its movie.
pub fn make_comment(
    text: impl Into<String>,
    user: &mut User,
    movie: &mut Movie,
    timestamp: NaiveDateTime,
) -> Comment {
    let comment = Comment::new(Some(&*user), Some(&*movie), text, timestamp);
    user.add_comment(comment.clone());
    movie.add_comment(comment.clone());
    comment
}

/// Selects movies by one of their associations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieFilter {
    ByGenre(Genre),
    ByActor(Actor),
    ByDirector(Director),
}

impl MovieFilter {
    pub fn matches(&self, movie: &Movie) -> bool {
        match self {
            MovieFilter::ByGenre(genre) => movie.genres().contains(genre),
            MovieFilter::ByActor(actor) => movie.actors().contains(actor),
            MovieFilter::ByDirector(director) => movie.director() == Some(director),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 2, 28)
            .and_then(|d| d.and_hms_opt(14, 31, 26))
            .unwrap()
    }

    fn guardians() -> Movie {
        Movie::new(1, "Guardians of the Galaxy", 2014)
            .with_description(
                "A group of intergalactic criminals are forced to work together to stop a fanatical warrior from taking control of the universe.",
            )
            .with_duration(121)
            .with_rating(8.1)
            .with_votes(757074)
            .with_revenue(Some(333.13))
            .with_metascore(Some(76))
            .unwrap()
    }

    #[test]
    fn test_movie_construction() {
        let movie = guardians();
        assert_eq!(movie.rank(), 1);
        assert_eq!(movie.title(), "Guardians of the Galaxy");
        assert_eq!(movie.year(), 2014);
        assert_eq!(movie.duration(), 121);
        assert_eq!(movie.rating(), 8.1);
        assert_eq!(movie.votes(), 757074);
        assert_eq!(movie.revenue(), Some(333.13));
        assert_eq!(movie.metascore(), Some(76));
        assert!(movie.director().is_none());
        assert_eq!(movie.to_string(), "<Movie Guardians of the Galaxy, 2014>");
    }

    #[test]
    fn test_movie_equality_ignores_rank() {
        let a = Movie::new(1, "Split", 2016);
        let b = Movie::new(3, "Split", 2016);
        let c = Movie::new(1, "Split", 2017);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Movie> = [a.clone(), b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Movie::new(999, "Split", 2016)));
    }

    #[test]
    fn test_movie_rank_order_ignores_title() {
        let first = Movie::new(1, "Zodiac", 2007);
        let second = Movie::new(2, "Alien", 1979);
        let twin = Movie::new(1, "Another", 2000);

        assert_eq!(first.rank_order(&second), Ordering::Less);
        assert_eq!(second.rank_order(&first), Ordering::Greater);
        assert_eq!(first.rank_order(&twin), Ordering::Equal);
        assert_ne!(first, twin);
    }

    #[test]
    fn test_movie_setters_validate() {
        let mut movie = Movie::new(5, "  Sing  ", 2016);
        assert_eq!(movie.title(), "Sing");

        assert!(movie.set_duration(108).is_ok());
        assert_eq!(movie.duration(), 108);
        assert!(matches!(movie.set_duration(-1), Err(DomainError::Validation(_))));
        assert_eq!(movie.duration(), 108);

        assert!(movie.set_metascore(Some(101)).is_err());
        assert!(movie.set_metascore(None).is_ok());
        assert_eq!(movie.metascore(), None);

        movie.set_description("   ");
        assert_eq!(movie.description(), None);
    }

    #[test]
    fn test_actors_and_genres_are_unique_by_append() {
        let mut movie = Movie::new(1, "Guardians of the Galaxy", 2014);
        assert!(movie.add_actor(Actor::new("Chris Pratt")));
        assert!(movie.add_actor(Actor::new("Vin Diesel")));
        assert!(!movie.add_actor(Actor::new(" Chris Pratt ")));
        assert_eq!(
            movie.actors(),
            &[Actor::new("Chris Pratt"), Actor::new("Vin Diesel")]
        );

        movie.add_genre(Genre::new("Action"));
        movie.add_genre(Genre::new("Action"));
        assert_eq!(movie.genres().len(), 1);

        movie.remove_actor(&Actor::new("Chris Pratt"));
        movie.remove_genre(&Genre::new("Comedy"));
        assert_eq!(movie.actors(), &[Actor::new("Vin Diesel")]);
        assert_eq!(movie.genres(), &[Genre::new("Action")]);
    }

    #[test]
    fn test_user_construction() {
        let user = User::new("  DBowie ", "1234567890");
        assert_eq!(user.user_name(), "dbowie");
        assert_eq!(user.password(), "1234567890");
        assert!(user.comments().is_empty());
        assert_eq!(user, User::new("dbowie", "other"));
    }

    #[test]
    fn test_user_watch_movie_counts_once() {
        let mut user = User::new("dbowie", "pw");
        let movie = guardians();
        user.watch_movie(&movie);
        user.watch_movie(&movie);
        assert_eq!(user.watched_movies(), &[1]);
        assert_eq!(user.watched_minutes(), 121);
    }

    #[test]
    fn test_make_comment_establishes_relationships() {
        let mut movie = guardians();
        let mut user = User::new("dbowie", "pw");
        let comment = make_comment("enjoyable movie", &mut user, &mut movie, ts());

        assert!(user.comments().contains(&comment));
        assert_eq!(comment.user_name(), Some("dbowie"));
        assert!(movie.comments().contains(&comment));
        assert_eq!(comment.movie_rank(), Some(1));
        assert_eq!(movie.number_of_comments(), 1);
    }

    #[test]
    fn test_comment_equality_is_full_field() {
        let user = User::new("dbowie", "pw");
        let movie = guardians();
        let a = Comment::new(Some(&user), Some(&movie), "nice", ts());
        let b = Comment::new(Some(&user), Some(&movie), "nice", ts());
        let c = Comment::new(Some(&user), Some(&movie), "not nice", ts());
        let d = Comment::new(None, Some(&movie), "nice", ts());
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_filter_matches() {
        let mut movie = guardians();
        movie.set_director(Director::new("James Gunn"));
        movie.add_actor(Actor::new("Zoe Saldana"));
        movie.add_genre(Genre::new("Sci-Fi"));

        assert!(MovieFilter::ByDirector(Director::new("James Gunn")).matches(&movie));
        assert!(!MovieFilter::ByDirector(Director::new("Ridley Scott")).matches(&movie));
        assert!(MovieFilter::ByActor(Actor::new("Zoe Saldana")).matches(&movie));
        assert!(MovieFilter::ByGenre(Genre::new("Sci-Fi")).matches(&movie));
        assert!(!MovieFilter::ByGenre(Genre::new("Horror")).matches(&movie));
    }

    #[test]
    fn test_user_serialization_hides_password() {
        let user = User::new("fmercury", "secret-hash");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["user_name"], "fmercury");
        assert!(json.get("password").is_none());
    }
}
