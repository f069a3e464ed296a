//! Inventory records and their id generator.

use std::fmt;

/// First number handed out by a fresh [`IdSequence`].
pub const DEFAULT_ID_SEED: u32 = 100;

/// Rental rate of a newly created record.
pub const DEFAULT_RENTAL_RATE: f64 = 1.99;

/// Rating of a newly created record.
pub const DEFAULT_RATING: &str = "R";

/// One video in the rental inventory.
///
/// The id is fixed at construction; every other field can be edited. The
/// rating is free text ("PG-13", "R", ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    id: String,
    title: String,
    rental_rate: f64,
    year: i32,
    rating: String,
    new_release: bool,
}

impl Video {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        rental_rate: f64,
        year: i32,
        rating: impl Into<String>,
        new_release: bool,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            rental_rate,
            year,
            rating: rating.into(),
            new_release,
        }
    }

    /// A blank record: empty title, default rate and rating, new release.
    #[must_use]
    pub fn blank(id: impl Into<String>, year: i32) -> Self {
        Self::new(id, "", DEFAULT_RENTAL_RATE, year, DEFAULT_RATING, true)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    #[must_use]
    pub const fn rental_rate(&self) -> f64 {
        self.rental_rate
    }

    pub fn set_rental_rate(&mut self, rental_rate: f64) {
        self.rental_rate = rental_rate;
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = year;
    }

    #[must_use]
    pub fn rating(&self) -> &str {
        &self.rating
    }

    pub fn set_rating(&mut self, rating: impl Into<String>) {
        self.rating = rating.into();
    }

    #[must_use]
    pub const fn is_new_release(&self) -> bool {
        self.new_release
    }

    pub fn set_new_release(&mut self, new_release: bool) {
        self.new_release = new_release;
    }
}

impl fmt::Display for Video {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} ({}, {})", self.id, self.title, self.year, self.rating)
    }
}

/// Generator of record ids `V<n>`.
///
/// `n` increases strictly until it reaches `u32::MAX`; from then on every
/// call returns `V4294967295` again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u32,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new(DEFAULT_ID_SEED)
    }
}

impl IdSequence {
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { next: seed }
    }

    /// Restart numbering at `seed`.
    pub fn reset(&mut self, seed: u32) {
        self.next = seed;
    }

    /// Number the next id will carry.
    #[must_use]
    pub const fn peek(&self) -> u32 {
        self.next
    }

    /// Take the current id and advance, stopping at the ceiling.
    pub fn next_id(&mut self) -> String {
        let id = format!("V{}", self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}
