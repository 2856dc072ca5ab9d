use std::borrow::Cow;
use std::io::{self, Write};

use crate::models::{Catalog, MovieRecord};

/// Horizontal rule framing each heading
pub const RULE: &str = "______________________________________________________";

/// Order in which a catalog is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Order of insertion
    Insertion,
    /// Ascending by title
    TitleAsc,
    /// Descending by rating, ties in insertion order
    RatingDesc,
}

impl SortOrder {
    /// The three orderings in render sequence
    pub const ALL: [SortOrder; 3] = [
        SortOrder::Insertion,
        SortOrder::TitleAsc,
        SortOrder::RatingDesc,
    ];

    /// Text appended to the heading
    pub fn heading_suffix(&self) -> &'static str {
        match self {
            SortOrder::Insertion => "",
            SortOrder::TitleAsc => " (Sorted Alphabetically)",
            SortOrder::RatingDesc => " (Sorted by rating)",
        }
    }

    /// Records of `catalog` in this order
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Cow<'a, [MovieRecord]> {
        match self {
            SortOrder::Insertion => Cow::Borrowed(catalog.view()),
            SortOrder::TitleAsc => Cow::Owned(catalog.sorted_by_title()),
            SortOrder::RatingDesc => Cow::Owned(catalog.sorted_by_rating()),
        }
    }
}

/// Writes a heading block followed by one `title | rating` line per movie
pub fn render(
    out: &mut dyn Write,
    heading: &str,
    catalog: &Catalog,
    order: SortOrder,
) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{}{}", heading, order.heading_suffix())?;
    writeln!(out, "{}", RULE)?;

    for movie in order.apply(catalog).iter() {
        writeln!(out, "{} | {}", movie.title(), movie.rating())?;
    }

    Ok(())
}

/// Writes one `Matching movie: <title>` line per record
pub fn render_matches(out: &mut dyn Write, matches: &[MovieRecord]) -> io::Result<()> {
    for movie in matches {
        writeln!(out, "Matching movie: {}", movie.title())?;
    }
    Ok(())
}
