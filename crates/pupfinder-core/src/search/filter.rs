//! Client-side free-text refinement over an already resolved page.

use serde::{Deserialize, Serialize};

use crate::dog::Dog;

/// Case-insensitive substring filter over name, breed and zip code.
///
/// Display refinement only: it never changes totals or pagination cursors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFilter {
    needle: String,
}

impl TextFilter {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            needle: text.as_ref().trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, dog: &Dog) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        [&dog.name, &dog.breed, &dog.zip_code]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }

    pub fn apply<'a>(&self, dogs: &'a [Dog]) -> Vec<&'a Dog> {
        dogs.iter().filter(|dog| self.matches(dog)).collect()
    }
}
