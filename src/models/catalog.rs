use regex::Regex;

use super::MovieRecord;

/// Fixed table used to exercise rendering without the remote service
const SAMPLE_MOVIES: [(&str, f64); 10] = [
    ("The Shawshank Redemption", 9.3),
    ("The Godfather", 9.2),
    ("The Dark Knight", 9.4),
    ("Pulp Fiction", 9.0),
    ("Forrest Gump", 8.9),
    ("Inception", 9.1),
    ("Fight Club", 8.8),
    ("The Matrix", 9.0),
    ("Goodfellas", 9.1),
    ("The Lord of the Rings: The Return of the King", 9.3),
];

/// Append-only, insertion-ordered collection of movies
///
/// The sorted queries return fresh copies; the catalog itself keeps the
/// order in which records were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
}

impl Catalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the sample table
    pub fn with_sample_data() -> Self {
        let mut catalog = Self::new();
        catalog.seed_with_sample_data();
        catalog
    }

    /// Appends a movie. Duplicates are kept.
    pub fn add(&mut self, title: impl Into<String>, rating: f64) {
        self.movies.push(MovieRecord::new(title, rating));
    }

    /// Appends already-built records, preserving their order
    pub fn extend(&mut self, records: impl IntoIterator<Item = MovieRecord>) {
        self.movies.extend(records);
    }

    /// Records in insertion order
    pub fn view(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Copy sorted ascending by title (byte-wise)
    pub fn sorted_by_title(&self) -> Vec<MovieRecord> {
        let mut sorted = self.movies.clone();
        sorted.sort_by(|a, b| a.title().cmp(b.title()));
        sorted
    }

    /// Copy sorted descending by rating; equal ratings keep insertion order
    pub fn sorted_by_rating(&self) -> Vec<MovieRecord> {
        let mut sorted = self.movies.clone();
        sorted.sort_by(|a, b| b.rating().total_cmp(&a.rating()));
        sorted
    }

    /// Replaces the contents with the sample table
    pub fn seed_with_sample_data(&mut self) {
        self.movies = SAMPLE_MOVIES
            .iter()
            .map(|(title, rating)| MovieRecord::new(*title, *rating))
            .collect();
    }

    /// Copy of the records whose title contains a match for `pattern`
    pub fn matching(&self, pattern: &Regex) -> Vec<MovieRecord> {
        self.movies
            .iter()
            .filter(|movie| pattern.is_match(movie.title()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(records: &[MovieRecord]) -> Vec<&str> {
        records.iter().map(|m| m.title()).collect()
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut catalog = Catalog::new();
        catalog.add("Zodiac", 7.7);
        catalog.add("Alien", 8.5);
        catalog.add("Zodiac", 7.7);

        assert_eq!(catalog.len(), 3);
        assert_eq!(titles(catalog.view()), vec!["Zodiac", "Alien", "Zodiac"]);
        assert_eq!(catalog.view()[1], MovieRecord::new("Alien", 8.5));
    }

    #[test]
    fn test_add_clamps_non_finite_rating() {
        let mut catalog = Catalog::new();
        catalog.add("Broken", f64::NAN);
        assert_eq!(catalog.view()[0].rating(), 0.0);
    }

    #[test]
    fn test_sorted_by_title() {
        let catalog = Catalog::with_sample_data();
        let sorted = catalog.sorted_by_title();

        assert_eq!(
            titles(&sorted),
            vec![
                "Fight Club",
                "Forrest Gump",
                "Goodfellas",
                "Inception",
                "Pulp Fiction",
                "The Dark Knight",
                "The Godfather",
                "The Lord of the Rings: The Return of the King",
                "The Matrix",
                "The Shawshank Redemption",
            ]
        );
    }

    #[test]
    fn test_sorted_by_title_is_byte_wise() {
        let mut catalog = Catalog::new();
        catalog.add("alien", 1.0);
        catalog.add("Zodiac", 2.0);
        catalog.add("Amélie", 3.0);
        catalog.add("Amelie", 4.0);

        assert_eq!(
            titles(&catalog.sorted_by_title()),
            vec!["Amelie", "Amélie", "Zodiac", "alien"]
        );
    }

    #[test]
    fn test_sorted_by_rating_is_stable() {
        let catalog = Catalog::with_sample_data();
        let sorted = catalog.sorted_by_rating();

        assert_eq!(
            titles(&sorted),
            vec![
                "The Dark Knight",
                "The Shawshank Redemption",
                "The Lord of the Rings: The Return of the King",
                "The Godfather",
                "Inception",
                "Goodfellas",
                "Pulp Fiction",
                "The Matrix",
                "Forrest Gump",
                "Fight Club",
            ]
        );
        assert!(sorted.windows(2).all(|w| w[0].rating() >= w[1].rating()));
    }

    #[test]
    fn test_sorted_views_do_not_mutate() {
        let catalog = Catalog::with_sample_data();
        let before = catalog.view().to_vec();

        let by_title = catalog.sorted_by_title();
        let by_rating = catalog.sorted_by_rating();

        assert_eq!(catalog.view(), before.as_slice());
        assert_eq!(catalog.sorted_by_title(), by_title);
        assert_eq!(catalog.sorted_by_rating(), by_rating);
    }

    #[test]
    fn test_sorted_views_are_permutations() {
        let catalog = Catalog::with_sample_data();
        for sorted in [catalog.sorted_by_title(), catalog.sorted_by_rating()] {
            assert_eq!(sorted.len(), catalog.len());
            for movie in catalog.view() {
                let expected = catalog.view().iter().filter(|m| *m == movie).count();
                let actual = sorted.iter().filter(|m| *m == movie).count();
                assert_eq!(expected, actual);
            }
        }
    }

    #[test]
    fn test_seed_replaces_contents() {
        let mut catalog = Catalog::new();
        catalog.add("Leftover", 1.0);
        catalog.seed_with_sample_data();

        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.view()[0], MovieRecord::new("The Shawshank Redemption", 9.3));
        assert_eq!(
            catalog.view()[9],
            MovieRecord::new("The Lord of the Rings: The Return of the King", 9.3)
        );
        assert!(!titles(catalog.view()).contains(&"Leftover"));
    }

    #[test]
    fn test_empty_catalog_views() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.sorted_by_title().is_empty());
        assert!(catalog.sorted_by_rating().is_empty());
    }

    #[test]
    fn test_matching_is_substring_search() {
        let mut catalog = Catalog::new();
        catalog.add("Despicable Me 4", 7.2);
        catalog.add("Deadpool & Wolverine", 7.7);
        catalog.add("The Descent", 7.2);
        catalog.add("Mad Max: Fury Road", 7.6);

        let pattern = Regex::new(".*[dD]es.*").unwrap();
        let matches = catalog.matching(&pattern);

        assert_eq!(titles(&matches), vec!["Despicable Me 4", "The Descent"]);
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_matching_sample_data_has_no_des_titles() {
        // "Redemption" contains "dem", not "des"
        let catalog = Catalog::with_sample_data();
        let pattern = Regex::new(".*[dD]es.*").unwrap();
        assert!(catalog.matching(&pattern).is_empty());

        let pattern = Regex::new("[dD]em").unwrap();
        assert_eq!(
            titles(&catalog.matching(&pattern)),
            vec!["The Shawshank Redemption"]
        );
    }
}
