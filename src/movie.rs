//! Movie record loaded from the dataset.
//!
//! Two movies are the same movie when their titles match ignoring ASCII
//! case; `Hash` agrees with that, so `Movie` itself can be a table key.
//! Rating order is a separate, explicit comparison rather than `Ord`,
//! because it does not agree with title equality.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

#[derive(Clone, Debug, Default)]
pub struct Movie {
    pub name: String,
    pub year: i32,
    pub duration: String,
    pub genre: String,
    pub rating: f64,
    pub description: String,
    pub director: String,
    pub stars: String,
}

impl Movie {
    /// Orders by rating ascending, then by title ignoring ASCII case.
    pub fn cmp_by_rating(&self, other: &Self) -> Ordering {
        self.rating
            .total_cmp(&other.rating)
            .then_with(|| cmp_ignore_ascii_case(&self.name, &other.name))
    }
}

fn cmp_ignore_ascii_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for Movie {}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.name.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}), {} - {} - {} | {} | Directed by: {} | Stars: {}",
            self.name,
            self.year,
            self.duration,
            self.genre,
            self.rating,
            self.description,
            self.director,
            self.stars
        )
    }
}
