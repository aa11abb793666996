//! Meal domain model.
//!
//! # Responsibility
//! - Define the single user-facing record: name, optional photo, star rating.
//! - Gatekeep construction so an invalid `Meal` can never exist.
//!
//! # Invariants
//! - `name` is never empty.
//! - `rating` is always within `MIN_RATING..=MAX_RATING`.
//! - Validity is checked once, in `Meal::try_new`. Fields are private and
//!   there is no partial mutation API; edits replace the whole record.
//! - Deserialization goes through `Meal::try_new`, so decoded records obey
//!   the same invariants as freshly created ones.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 0;
/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;

/// Validation failures for meal construction.
///
/// These are expected outcomes of user input, not fatal conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealValidationError {
    /// `name` has zero length.
    EmptyName,
    /// `rating` is outside `MIN_RATING..=MAX_RATING`.
    RatingOutOfRange { rating: i64 },
}

impl Display for MealValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "meal name must not be empty"),
            Self::RatingOutOfRange { rating } => write!(
                f,
                "meal rating ({rating}) must be between {MIN_RATING} and {MAX_RATING}"
            ),
        }
    }
}

impl Error for MealValidationError {}

/// One recorded meal.
///
/// `image` distinguishes "no photo" (`None`) from an empty payload
/// (`Some(vec![])`); both survive persistence unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MealWire")]
pub struct Meal {
    name: String,
    #[serde(serialize_with = "serialize_image")]
    image: Option<Vec<u8>>,
    rating: u8,
}

impl Meal {
    /// Builds a meal when every invariant holds.
    ///
    /// # Errors
    /// - `EmptyName` when `name` has zero length.
    /// - `RatingOutOfRange` when `rating` is negative or above `MAX_RATING`.
    pub fn try_new(
        name: impl Into<String>,
        image: Option<Vec<u8>>,
        rating: i32,
    ) -> Result<Self, MealValidationError> {
        Self::from_wide_rating(name.into(), image, i64::from(rating))
    }

    fn from_wide_rating(
        name: String,
        image: Option<Vec<u8>>,
        rating: i64,
    ) -> Result<Self, MealValidationError> {
        if name.is_empty() {
            return Err(MealValidationError::EmptyName);
        }

        let rating = u8::try_from(rating)
            .ok()
            .filter(|value| (MIN_RATING..=MAX_RATING).contains(value))
            .ok_or(MealValidationError::RatingOutOfRange { rating })?;

        Ok(Self {
            name,
            image,
            rating,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw photo bytes, if a photo was attached.
    pub fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    /// Consumes the meal and returns `(name, image, rating)`.
    pub fn into_parts(self) -> (String, Option<Vec<u8>>, u8) {
        (self.name, self.image, self.rating)
    }
}

/// Persisted shape of a meal before validation.
///
/// Only `name` is required. A missing `image` key means "no photo" and a
/// missing `rating` key means zero stars.
#[derive(Deserialize)]
struct MealWire {
    name: String,
    #[serde(default, deserialize_with = "deserialize_image")]
    image: Option<Vec<u8>>,
    #[serde(default)]
    rating: i64,
}

impl TryFrom<MealWire> for Meal {
    type Error = MealValidationError;

    fn try_from(value: MealWire) -> Result<Self, Self::Error> {
        Meal::from_wide_rating(value.name, value.image, value.rating)
    }
}

fn serialize_image<S>(image: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match image {
        Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
        None => serializer.serialize_none(),
    }
}

fn deserialize_image<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let encoded = Option::<String>::deserialize(deserializer)?;
    encoded
        .map(|text| {
            STANDARD
                .decode(text.as_bytes())
                .map_err(|err| serde::de::Error::custom(format!("invalid image payload: {err}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::{Meal, MealValidationError};

    #[test]
    fn rating_above_u8_range_reports_original_value() {
        let err = Meal::try_new("Big", None, 300).unwrap_err();
        assert_eq!(err, MealValidationError::RatingOutOfRange { rating: 300 });
    }

    #[test]
    fn whitespace_name_is_not_empty() {
        let meal = Meal::try_new(" ", None, 1).unwrap();
        assert_eq!(meal.name(), " ");
    }

    #[test]
    fn into_parts_returns_inputs() {
        let meal = Meal::try_new("Soup", Some(vec![1, 2, 3]), 2).unwrap();
        assert_eq!(meal.into_parts(), ("Soup".to_string(), Some(vec![1, 2, 3]), 2));
    }

    #[test]
    fn validation_message_names_bounds() {
        let message = MealValidationError::RatingOutOfRange { rating: -1 }.to_string();
        assert!(message.contains("between 0 and 5"), "{message}");
    }
}
