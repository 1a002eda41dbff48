//! Sort order for catalog searches.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PupError;

/// Field the catalog service sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Breed,
    Age,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Breed => "breed",
            Self::Age => "age",
        }
    }
}

impl Default for SortField {
    fn default() -> Self {
        Self::Breed
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Sort key and direction, rendered as the single `<field>:<direction>`
/// token the search endpoint expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// The wire token, e.g. `name:asc`.
    pub fn token(&self) -> String {
        format!("{}:{}", self.field.as_str(), self.direction.as_str())
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

impl FromStr for SortField {
    type Err = PupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "breed" => Ok(Self::Breed),
            "age" => Ok(Self::Age),
            other => Err(PupError::invalid_criteria(format!(
                "unknown sort field '{}'",
                other
            ))),
        }
    }
}

impl FromStr for SortDirection {
    type Err = PupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(PupError::invalid_criteria(format!(
                "unknown sort direction '{}'",
                other
            ))),
        }
    }
}

impl FromStr for SortOrder {
    type Err = PupError;

    /// Parses `field:direction`; a bare `field` sorts ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            Some((field, direction)) => (field.parse()?, direction.parse()?),
            None => (s.parse()?, SortDirection::Asc),
        };
        Ok(Self { field, direction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_breed_ascending() {
        assert_eq!(SortOrder::default().token(), "breed:asc");
    }

    #[test]
    fn test_token() {
        let order = SortOrder::new(SortField::Age, SortDirection::Desc);
        assert_eq!(order.token(), "age:desc");
        assert_eq!(order.to_string(), "age:desc");
    }

    #[test]
    fn test_parse() {
        let order: SortOrder = "Name:DESC".parse().unwrap();
        assert_eq!(order, SortOrder::new(SortField::Name, SortDirection::Desc));

        let bare: SortOrder = "age".parse().unwrap();
        assert_eq!(bare, SortOrder::new(SortField::Age, SortDirection::Asc));

        assert!("size:asc".parse::<SortOrder>().is_err());
        assert!("name:up".parse::<SortOrder>().is_err());
    }
}
