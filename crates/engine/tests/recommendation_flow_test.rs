use flickpick_core::{FlickpickError, Movie, TasteProfile};
use flickpick_engine::{Catalog, RecommendationEngine, ScoringWeights, SimilarityTable};
use std::io::Write;

fn movie(title: &str, genres: &str, rating: f32) -> Movie {
    Movie {
        title: title.to_string(),
        genres: genres.to_string(),
        rating,
        certificate: None,
        released_year: None,
    }
}

fn taste(genres: &[&str], watched: &[&str]) -> TasteProfile {
    TasteProfile {
        preferred_genres: genres.iter().map(|g| g.to_string()).collect(),
        watched_titles: watched.iter().map(|t| t.to_string()).collect(),
    }
}

fn titles(movies: &[&Movie]) -> Vec<String> {
    movies.iter().map(|m| m.title.clone()).collect()
}

/// Catalog A/B/C with sim(A,B)=0.5 and sim(A,C)=0.0.
fn abc_engine() -> RecommendationEngine {
    let catalog = Catalog::new(vec![
        movie("A", "Action", 8.0),
        movie("B", "Action, Drama", 8.0),
        movie("C", "Comedy", 8.0),
    ])
    .unwrap();
    let similarity = SimilarityTable::from_rows(vec![
        vec![1.0, 0.5, 0.0],
        vec![0.5, 1.0, 0.3],
        vec![0.0, 0.3, 1.0],
    ])
    .unwrap();
    RecommendationEngine::new(catalog, similarity).unwrap()
}

#[test]
fn test_genre_preference_scenario() {
    let engine = abc_engine();
    let taste = taste(&["Action"], &[]);

    let result = engine.recommend_explained(&taste, 2);

    // A and B both score 2.0 on the Action match and keep catalog order; C
    // scores 0.0 and misses the cut.
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].0.title, "A");
    assert_eq!(result[1].0.title, "B");
    assert_eq!(result[0].1.because_genres, vec!["Action"]);
    assert_eq!(result[1].1.because_genres, vec!["Action"]);

    let unranked = engine.explain("C", &taste).unwrap();
    assert!(unranked.is_empty());
}

#[test]
fn test_watched_boost_scenario() {
    let engine = abc_engine();
    let taste = taste(&[], &["A"]);

    let result = engine.recommend_explained(&taste, 2);

    // B scores 3.5 * 0.5, C scores 0.0, A is excluded outright.
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].0.title, "B");
    assert_eq!(result[1].0.title, "C");
    assert_eq!(result[0].1.because_watched, vec!["A"]);
    assert_eq!(
        result[0].1.render().as_deref(),
        Some("You watched A")
    );
}

#[test]
fn test_watched_titles_are_never_recommended() {
    let engine = abc_engine();

    for watched in [&["A"][..], &["A", "B"][..], &["A", "B", "C"][..]] {
        let result = engine.recommend(&taste(&["Action", "Comedy"], watched), 10);
        for title in titles(&result) {
            assert!(!watched.contains(&title.as_str()));
        }
    }
}

#[test]
fn test_result_size_never_exceeds_limit() {
    let engine = abc_engine();
    let taste = taste(&["Action"], &[]);

    for n in 0..=5 {
        assert!(engine.recommend(&taste, n).len() <= n);
    }
    assert!(engine.recommend(&taste, 0).is_empty());
}

#[test]
fn test_identical_inputs_produce_identical_output() {
    let engine = abc_engine();
    let taste = taste(&["Action"], &["C"]);

    let first = titles(&engine.recommend(&taste, 3));
    for _ in 0..5 {
        assert_eq!(titles(&engine.recommend(&taste, 3)), first);
    }
}

#[test]
fn test_weight_schedule_shifts_from_genres_to_history() {
    let cold = ScoringWeights::for_watch_count(0);
    let warm = ScoringWeights::for_watch_count(1);
    let hot = ScoringWeights::for_watch_count(3);

    assert!(cold.genre > warm.genre && warm.genre > hot.genre);
    assert!(cold.watch < warm.watch && warm.watch < hot.watch);
    assert_eq!(cold.watch, 0.0);
}

#[test]
fn test_unknown_watched_title_equals_empty_history() {
    let engine = abc_engine();

    let with_unknown = titles(&engine.recommend(&taste(&[], &["No Such Title"]), 5));
    let empty = titles(&engine.recommend(&taste(&[], &[]), 5));

    assert_eq!(with_unknown, empty);
}

#[test]
fn test_empty_inputs_return_catalog_order_without_reasons() {
    let engine = abc_engine();

    let result = engine.recommend_explained(&taste(&[], &[]), 10);

    assert_eq!(result.len(), 3);
    let ordered: Vec<&str> = result.iter().map(|(m, _)| m.title.as_str()).collect();
    assert_eq!(ordered, vec!["A", "B", "C"]);
    assert!(result.iter().all(|(_, reason)| reason.is_empty()));
}

#[test]
fn test_genre_matches_are_always_represented() {
    // Three Drama rows score far below the similarity-boosted Thriller rows,
    // yet all three must surface in the top three.
    let catalog = Catalog::new(vec![
        movie("Watched", "Thriller", 8.0),
        movie("Near", "Thriller", 8.1),
        movie("Close", "Thriller", 8.2),
        movie("Stage", "Drama", 7.1),
        movie("Scene", "Drama", 7.2),
        movie("Act", "Drama", 7.3),
    ])
    .unwrap();
    let similarity = SimilarityTable::from_rows(vec![
        vec![1.0, 0.9, 0.8, 0.0, 0.0, 0.0],
        vec![0.9, 1.0, 0.7, 0.0, 0.0, 0.0],
        vec![0.8, 0.7, 1.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 1.0, 0.5, 0.5],
        vec![0.0, 0.0, 0.0, 0.5, 1.0, 0.5],
        vec![0.0, 0.0, 0.0, 0.5, 0.5, 1.0],
    ])
    .unwrap();
    let engine = RecommendationEngine::new(catalog, similarity).unwrap();

    let result = engine.recommend(&taste(&["Drama"], &["Watched"]), 3);

    let drama_count = result.iter().filter(|m| m.genres.contains("Drama")).count();
    assert_eq!(drama_count, 3);
}

#[test]
fn test_excluded_rows_rank_below_legitimately_negative_scores() {
    let catalog = Catalog::new(vec![
        movie("Watched", "Thriller", 8.0),
        movie("Opposite", "Thriller", 7.0),
        movie("Neutral", "Comedy", 7.5),
    ])
    .unwrap();
    let similarity = SimilarityTable::from_rows(vec![
        vec![1.0, -0.9, 0.2],
        vec![-0.9, 1.0, 0.0],
        vec![0.2, 0.0, 1.0],
    ])
    .unwrap();
    let engine = RecommendationEngine::new(catalog, similarity).unwrap();

    // "Opposite" accumulates 3.5 * -0.9, well below the -1 a finite sentinel
    // scheme would use, and must still be returned ahead of nothing.
    let result = engine.recommend(&taste(&[], &["Watched"]), 5);

    assert_eq!(titles(&result), vec!["Neutral", "Opposite"]);
}

#[test]
fn test_end_to_end_from_data_files() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("movies.csv");
    let sim_path = dir.path().join("similarity.bin");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(
        file,
        "Series_Title,Genre,IMDB_Rating,Certificate,Released_Year"
    )
    .unwrap();
    writeln!(file, "The Dark Knight,\"Action, Crime, Drama\",9.0,UA,2008").unwrap();
    writeln!(file, "Inception,\"Action, Adventure, Sci-Fi\",8.8,UA,2010").unwrap();
    writeln!(file, "The Hangover,Comedy,7.7,R,2009").unwrap();
    writeln!(file, "Paddington,\"Comedy, Family\",7.3,U,2014").unwrap();

    SimilarityTable::from_rows(vec![
        vec![1.0, 0.8, 0.1, 0.0],
        vec![0.8, 1.0, 0.2, 0.1],
        vec![0.1, 0.2, 1.0, 0.6],
        vec![0.0, 0.1, 0.6, 1.0],
    ])
    .unwrap()
    .save(&sim_path)
    .unwrap();

    let engine = RecommendationEngine::load(&csv_path, &sim_path).unwrap();

    assert_eq!(engine.catalog().len(), 4);
    assert_eq!(
        engine.catalog().genre_vocabulary(),
        &[
            "Action".to_string(),
            "Adventure".to_string(),
            "Comedy".to_string(),
            "Crime".to_string(),
            "Drama".to_string(),
            "Family".to_string(),
            "Sci-Fi".to_string()
        ]
    );

    let result = engine.recommend_explained(&taste(&["Comedy"], &["The Dark Knight"]), 3);

    let ordered: Vec<&str> = result.iter().map(|(m, _)| m.title.as_str()).collect();
    assert_eq!(ordered, vec!["The Hangover", "Paddington", "Inception"]);
    assert_eq!(
        result[2].1.render().as_deref(),
        Some("You watched The Dark Knight")
    );
    assert_eq!(
        result[0].1.render().as_deref(),
        Some("You selected genre(s) Comedy")
    );
}

#[test]
fn test_mismatched_data_files_fail_startup() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("movies.csv");
    let sim_path = dir.path().join("similarity.bin");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(
        file,
        "Series_Title,Genre,IMDB_Rating,Certificate,Released_Year"
    )
    .unwrap();
    writeln!(file, "A,Action,8.0,U,2000").unwrap();
    writeln!(file, "B,Drama,7.0,U,2001").unwrap();

    SimilarityTable::from_rows(vec![vec![1.0]])
        .unwrap()
        .save(&sim_path)
        .unwrap();

    let err = RecommendationEngine::load(&csv_path, &sim_path).unwrap_err();
    assert!(matches!(
        err,
        FlickpickError::ShapeMismatch {
            rows: 1,
            cols: 1,
            catalog: 2
        }
    ));
}
