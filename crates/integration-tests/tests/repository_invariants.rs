use domains::{make_comment, Actor, Comment, DomainError, Genre, Movie, MovieRepository, Rank, User};
use integration_tests::{ranked_repo, timestamp};
use storage_adapters::MemoryMovieRepository;

fn ranks(repo: &MemoryMovieRepository) -> Vec<Rank> {
    repo.get_all_movies().iter().map(Movie::rank).collect()
}

#[test]
fn all_movies_are_sorted_after_scrambled_inserts() {
    let repo = ranked_repo(1000);
    let ranks = ranks(&repo);
    assert_eq!(ranks.len(), 1000);
    assert!(ranks.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn every_movie_is_indexed_and_listed_once() {
    let repo = ranked_repo(250);
    for movie in repo.get_all_movies() {
        let indexed = repo.get_movie(movie.rank()).unwrap();
        assert_eq!(indexed.title(), movie.title());
        let occurrences = repo
            .get_all_movies()
            .iter()
            .filter(|m| m.rank() == movie.rank())
            .count();
        assert_eq!(occurrences, 1);
    }
}

#[test]
fn neighbors_on_contiguous_ranks() {
    let n = 100;
    let repo = ranked_repo(n);
    for k in 1..=n {
        let movie = repo.get_movie(k).unwrap();
        let expected_prev = (k > 1).then(|| k - 1);
        let expected_next = (k < n).then(|| k + 1);
        assert_eq!(repo.get_previous_rank(movie), expected_prev, "previous of {k}");
        assert_eq!(repo.get_next_rank(movie), expected_next, "next of {k}");
    }
}

#[test]
fn neighbors_on_sparse_ranks_do_not_assume_position_equals_rank() {
    let mut repo = MemoryMovieRepository::new();
    for rank in [500, 10, 250, 999, 11] {
        repo.add_movie(Movie::new(rank, format!("Movie {rank}"), 2000));
    }
    let movie = repo.get_movie(250).unwrap();
    assert_eq!(repo.get_previous_rank(movie), Some(11));
    assert_eq!(repo.get_next_rank(movie), Some(500));
    let movie = repo.get_movie(10).unwrap();
    assert_eq!(repo.get_previous_rank(movie), None);
}

#[test]
fn range_lookup_returns_exact_rank_only() {
    let repo = ranked_repo(1000);
    let found = repo.get_movies_at_rank(500);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].rank(), 500);
    assert!(repo.get_movies_at_rank(99999).is_empty());
}

#[test]
fn adding_rank_1001_to_a_full_catalog() {
    let mut repo = ranked_repo(1000);
    let movie = Movie::new(1001, "Some Movie", 2015)
        .with_description("yes some movie")
        .with_duration(100)
        .with_rating(5.4)
        .with_votes(1234)
        .with_revenue(Some(543.3))
        .with_metascore(Some(67))
        .unwrap();
    repo.add_movie(movie.clone());

    assert_eq!(repo.get_movie_count(), 1001);
    let stored = repo.get_movie(1001).unwrap();
    assert_eq!(stored, &movie);
    assert_eq!(stored.rank(), 1001);
    assert_eq!(repo.get_last_movie().unwrap().title(), "Some Movie");
}

#[test]
fn equality_and_ordering_are_independent() {
    let a = Movie::new(1, "Split", 2016);
    let b = Movie::new(2, "Split", 2016);
    assert_eq!(a, b);
    assert!(a.rank_order(&b).is_lt());

    let mut repo = MemoryMovieRepository::new();
    repo.add_movie(b);
    assert!(repo.get_all_movies().contains(&a));
    assert!(repo.get_movie(1).is_none());
}

#[test]
fn comment_gate_admits_linked_comment_only() {
    let mut repo = ranked_repo(3);
    repo.add_user(User::new("thorke", "hash"));

    let (user, movie) = repo.comment_targets_mut("thorke", 2).unwrap();
    let linked = make_comment("will watch it again", user, movie, timestamp());
    repo.add_comment(linked.clone()).unwrap();
    assert_eq!(repo.get_comments(), &[linked]);

    let half_linked = {
        let user = repo.get_user("thorke").unwrap();
        let movie = repo.get_movie(3).unwrap();
        Comment::new(Some(user), Some(movie), "love it", timestamp())
    };
    repo.get_movie_mut(3).unwrap().add_comment(half_linked.clone());

    let before = repo.get_comments().len();
    assert!(matches!(
        repo.add_comment(half_linked),
        Err(DomainError::Integrity(_))
    ));
    assert_eq!(repo.get_comments().len(), before);
}

#[test]
fn registries_are_idempotent() {
    let mut repo = MemoryMovieRepository::new();
    for _ in 0..3 {
        repo.add_actor(Actor::new("Chris Pratt"));
        repo.add_genre(Genre::new("Action"));
    }
    assert_eq!(repo.get_actors().len(), 1);
    assert_eq!(repo.get_genres().len(), 1);
}
