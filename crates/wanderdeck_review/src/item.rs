//! # Review Items
//!
//! Identifiers and the caller-owned item record.

use serde::{Deserialize, Serialize};

/// Stable identifier of a review item.
///
/// Numeric identifiers are stored in their decimal form, so `ItemId::from(7u64)`
/// and `ItemId::from("7")` name the same item.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an identifier from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Anything the scheduler can look up by identifier.
pub trait Reviewable {
    /// Returns the item's identifier.
    fn item_id(&self) -> &ItemId;
}

impl Reviewable for ItemId {
    fn item_id(&self) -> &ItemId {
        self
    }
}

impl<T: Reviewable + ?Sized> Reviewable for &T {
    fn item_id(&self) -> &ItemId {
        (**self).item_id()
    }
}

/// A question/answer pair supplied by the deck.
///
/// Immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewItem {
    id: ItemId,
    question: String,
    answer: String,
}

impl ReviewItem {
    /// Creates a new item.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Returns the prompt side.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Returns the answer side.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

impl Reviewable for ReviewItem {
    fn item_id(&self) -> &ItemId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_text_ids_agree() {
        assert_eq!(ItemId::from(42u64), ItemId::from("42"));
        assert_eq!(ItemId::from(-3i64).as_str(), "-3");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ItemId::from("jour")).expect("serialize");
        assert_eq!(json, "\"jour\"");
    }
}
