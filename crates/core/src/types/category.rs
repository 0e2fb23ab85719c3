//! Product categories.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Catalog category of a product.
///
/// Drives which catalog grid a product renders into. Only `drink` renders in
/// the drinks grid; every other value renders with the wears.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Category {
    /// Clothing and accessories.
    #[default]
    Wear,
    /// Beverages.
    Drink,
    /// Any other stored tag, kept verbatim so it survives a rewrite.
    Other(String),
}

impl Category {
    /// All categories, in form-select order.
    pub const ALL: [Self; 2] = [Self::Wear, Self::Drink];

    /// Stored tag (`wear`, `drink`, or the unknown tag as stored).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Wear => "wear",
            Self::Drink => "drink",
            Self::Other(tag) => tag,
        }
    }

    /// Returns `true` only for [`Category::Drink`].
    #[must_use]
    pub const fn is_drink(&self) -> bool {
        matches!(self, Self::Drink)
    }

    /// Human label shown on catalog cards.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        if self.is_drink() { "Drink" } else { "Wear" }
    }

    /// Read a stored tag. Only an exact `drink` is a drink.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "wear" => Self::Wear,
            "drink" => Self::Drink,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wear" => Ok(Self::Wear),
            "drink" => Ok(Self::Drink),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_is_strict() {
        assert_eq!("wear".parse::<Category>().unwrap(), Category::Wear);
        assert_eq!("drink".parse::<Category>().unwrap(), Category::Drink);
        assert!("Drink".parse::<Category>().is_err());
        assert!("food".parse::<Category>().is_err());
    }

    #[test]
    fn test_unknown_stored_tag_is_kept_and_renders_as_wear() {
        let category: Category = serde_json::from_str("\"merch\"").unwrap();
        assert_eq!(category, Category::Other("merch".to_owned()));
        assert_eq!(category.as_str(), "merch");
        assert_eq!(category.label(), "Wear");
        assert_eq!(serde_json::to_string(&category).unwrap(), "\"merch\"");

        let category: Category = serde_json::from_str("\"DRINK\"").unwrap();
        assert!(!category.is_drink());
        assert_eq!(category.label(), "Wear");
    }

    #[test]
    fn test_serde_uses_lowercase_tags() {
        assert_eq!(serde_json::to_string(&Category::Drink).unwrap(), "\"drink\"");
        let category: Category = serde_json::from_str("\"drink\"").unwrap();
        assert_eq!(category, Category::Drink);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Category::Wear.label(), "Wear");
        assert_eq!(Category::Drink.label(), "Drink");
    }
}
