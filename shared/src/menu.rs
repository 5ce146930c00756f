//! Menu item types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed menu category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    Appetizer,
    MainCourse,
    Dessert,
    Beverage,
    Special,
    #[default]
    Other,
}

impl MenuCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Appetizer => "appetizer",
            MenuCategory::MainCourse => "main_course",
            MenuCategory::Dessert => "dessert",
            MenuCategory::Beverage => "beverage",
            MenuCategory::Special => "special",
            MenuCategory::Other => "other",
        }
    }

    /// Customer-facing display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MenuCategory::Appetizer => "Appetizers",
            MenuCategory::MainCourse => "Main Courses",
            MenuCategory::Dessert => "Desserts",
            MenuCategory::Beverage => "Beverages",
            MenuCategory::Special => "Specials",
            MenuCategory::Other => "Other",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&MenuCategory::MainCourse).unwrap(),
            "\"main_course\""
        );
        let category: MenuCategory = serde_json::from_str("\"beverage\"").unwrap();
        assert_eq!(category, MenuCategory::Beverage);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(MenuCategory::Appetizer.display_name(), "Appetizers");
        assert_eq!(MenuCategory::MainCourse.display_name(), "Main Courses");
    }
}
