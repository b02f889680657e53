//! Composition of catalog rows with a user's own Untappd data.

use std::collections::{HashMap, HashSet};

use super::models::{Beer, CheckInRating, RatedBeer};

/// A beer as it appears in a listing.
///
/// `user_rating` and `on_wishlist` are only present when the listing was
/// requested by a signed-in user and the annotation was looked up.
#[derive(Debug, Clone, Serialize)]
pub struct ListedBeer {
    #[serde(flatten)]
    pub beer: Beer,

    /// Aggregate Untappd rating.
    pub rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_wishlist: Option<bool>,
}

impl From<RatedBeer> for ListedBeer {
    fn from(row: RatedBeer) -> ListedBeer {
        ListedBeer {
            beer: row.beer,
            rating: row.rating,
            user_rating: None,
            on_wishlist: None,
        }
    }
}

/// One user's check-ins and wishlist, indexed by beer.
#[derive(Debug, Default)]
pub struct Personal {
    ratings: HashMap<i64, CheckInRating>,
    wishlist: Option<HashSet<i64>>,
}

impl Personal {
    /// Index check-ins by beer. Only the most recent check-in of each beer
    /// is kept; equal timestamps keep the one seen first.
    ///
    /// `wishlist` is `None` when the wishlist was not looked up at all.
    pub fn new(checkins: Vec<CheckInRating>, wishlist: Option<Vec<i64>>) -> Personal {
        let mut ratings: HashMap<i64, CheckInRating> = HashMap::new();

        for checkin in checkins {
            match ratings.get(&checkin.beer_id) {
                Some(latest) if latest.checked_in_at >= checkin.checked_in_at => {}
                _ => {
                    ratings.insert(checkin.beer_id, checkin);
                }
            }
        }

        Personal {
            ratings,
            wishlist: wishlist.map(|ids| ids.into_iter().collect()),
        }
    }

    pub fn rating(&self, beer_id: i64) -> Option<f64> {
        self.ratings.get(&beer_id).map(|c| c.rating)
    }

    pub fn on_wishlist(&self, beer_id: i64) -> Option<bool> {
        self.wishlist.as_ref().map(|ids| ids.contains(&beer_id))
    }
}

/// Left-join the user's annotations onto `rows`, keeping their order.
pub fn annotate(rows: Vec<RatedBeer>, personal: Option<&Personal>) -> Vec<ListedBeer> {
    rows.into_iter()
        .map(|row| {
            let mut listed = ListedBeer::from(row);
            if let Some(personal) = personal {
                listed.user_rating = personal.rating(listed.beer.beer_id);
                listed.on_wishlist = personal.on_wishlist(listed.beer.beer_id);
            }
            listed
        })
        .collect()
}

/// Beer ids of a set of listing rows, used to batch-load annotations.
pub fn beer_ids(rows: &[RatedBeer]) -> Vec<i64> {
    rows.iter().map(|r| r.beer.beer_id).collect()
}

/// A non-blank free-text search of the ordering range.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// `None` for a blank query, which means "no filter at all".
    pub fn parse(query: &str) -> Option<SearchTerm> {
        let query = query.trim();
        if query.is_empty() {
            None
        } else {
            Some(SearchTerm(query.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `ILIKE` pattern matching the term anywhere in a column.
    pub fn contains_pattern(&self) -> String {
        like_pattern(&self.0)
    }
}

/// Escape the LIKE wildcards in `term` and wrap it in `%`.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if c == '%' || c == '_' || c == '\\' {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
