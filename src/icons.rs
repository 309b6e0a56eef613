//! Category icons.
//!
//! The set is closed: every variant maps to one glyph at compile time, and a name outside
//! the set is rejected when a category is decoded instead of falling back to a default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryIcon {
    Fruits,
    Vegetables,
    Dairy,
    Bakery,
    Meat,
    Seafood,
    Beverages,
    Snacks,
    Pantry,
    Household,
    Basket,
}

impl CategoryIcon {
    pub const ALL: [CategoryIcon; 11] = [
        CategoryIcon::Fruits,
        CategoryIcon::Vegetables,
        CategoryIcon::Dairy,
        CategoryIcon::Bakery,
        CategoryIcon::Meat,
        CategoryIcon::Seafood,
        CategoryIcon::Beverages,
        CategoryIcon::Snacks,
        CategoryIcon::Pantry,
        CategoryIcon::Household,
        CategoryIcon::Basket,
    ];

    /// Stable name used in storage and URLs.
    pub fn name(self) -> &'static str {
        match self {
            CategoryIcon::Fruits => "fruits",
            CategoryIcon::Vegetables => "vegetables",
            CategoryIcon::Dairy => "dairy",
            CategoryIcon::Bakery => "bakery",
            CategoryIcon::Meat => "meat",
            CategoryIcon::Seafood => "seafood",
            CategoryIcon::Beverages => "beverages",
            CategoryIcon::Snacks => "snacks",
            CategoryIcon::Pantry => "pantry",
            CategoryIcon::Household => "household",
            CategoryIcon::Basket => "basket",
        }
    }

    /// Glyph identifier the presentation layer renders.
    pub fn glyph(self) -> &'static str {
        match self {
            CategoryIcon::Fruits => "apple",
            CategoryIcon::Vegetables => "carrot",
            CategoryIcon::Dairy => "milk",
            CategoryIcon::Bakery => "croissant",
            CategoryIcon::Meat => "beef",
            CategoryIcon::Seafood => "fish",
            CategoryIcon::Beverages => "cup-soda",
            CategoryIcon::Snacks => "cookie",
            CategoryIcon::Pantry => "wheat",
            CategoryIcon::Household => "spray-can",
            CategoryIcon::Basket => "shopping-basket",
        }
    }
}

impl fmt::Display for CategoryIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown category icon: {0}")]
pub struct UnknownIcon(pub String);

impl FromStr for CategoryIcon {
    type Err = UnknownIcon;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryIcon::ALL
            .into_iter()
            .find(|icon| icon.name() == s)
            .ok_or_else(|| UnknownIcon(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_icon_round_trips_through_its_name() {
        for icon in CategoryIcon::ALL {
            assert_eq!(icon.name().parse::<CategoryIcon>().unwrap(), icon);
            let json = serde_json::to_string(&icon).unwrap();
            assert_eq!(json, format!("\"{}\"", icon.name()));
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert_eq!(
            "rocket".parse::<CategoryIcon>(),
            Err(UnknownIcon("rocket".into()))
        );
        assert!(serde_json::from_str::<CategoryIcon>("\"rocket\"").is_err());
    }

    #[test]
    fn test_glyphs_are_distinct() {
        let mut glyphs: Vec<&str> = CategoryIcon::ALL.iter().map(|i| i.glyph()).collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), CategoryIcon::ALL.len());
    }
}
