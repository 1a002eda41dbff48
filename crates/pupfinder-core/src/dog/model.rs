//! Dog domain model.

use serde::{Deserialize, Serialize};

/// One adoptable dog as returned by the catalog service.
///
/// This is a read-only projection of remote state. It is cached only for the
/// lifetime of the query result (or favorites set) that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    /// Opaque, server-assigned identifier
    pub id: String,
    pub name: String,
    pub breed: String,
    /// Age in years
    pub age: u32,
    pub zip_code: String,
    /// Image URL
    #[serde(rename = "img")]
    pub image_url: String,
}

impl Dog {
    /// One-line summary used by list views.
    pub fn summary(&self) -> String {
        format!(
            "{} ({}, {} yr{}, {})",
            self.name,
            self.breed,
            self.age,
            if self.age == 1 { "" } else { "s" },
            self.zip_code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_shape() {
        let json = r#"{
            "id": "abc",
            "img": "https://example.com/abc.jpg",
            "name": "Rex",
            "age": 3,
            "zip_code": "10001",
            "breed": "Poodle"
        }"#;
        let dog: Dog = serde_json::from_str(json).unwrap();
        assert_eq!(dog.id, "abc");
        assert_eq!(dog.image_url, "https://example.com/abc.jpg");
        assert_eq!(dog.zip_code, "10001");
    }

    #[test]
    fn test_summary_pluralizes_age() {
        let mut dog = Dog {
            id: "1".into(),
            name: "Rex".into(),
            breed: "Poodle".into(),
            age: 1,
            zip_code: "10001".into(),
            image_url: String::new(),
        };
        assert_eq!(dog.summary(), "Rex (Poodle, 1 yr, 10001)");
        dog.age = 4;
        assert_eq!(dog.summary(), "Rex (Poodle, 4 yrs, 10001)");
    }
}
