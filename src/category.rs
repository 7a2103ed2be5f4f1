use std::fmt;

use crate::error::IntegrityError;

/// A 24-bit display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub color: Rgb,
}

/// Used for posts whose category is not registered.
pub const FALLBACK_COLOR: Rgb = Rgb(0x78, 0x71, 0x6c);

static CATEGORIES: [Category; 8] = [
    Category {
        name: "technology",
        color: Rgb(0x3b, 0x82, 0xf6),
    },
    Category {
        name: "science",
        color: Rgb(0x16, 0xa3, 0x4a),
    },
    Category {
        name: "finance",
        color: Rgb(0xef, 0x44, 0x44),
    },
    Category {
        name: "society",
        color: Rgb(0xea, 0xb3, 0x08),
    },
    Category {
        name: "entertainment",
        color: Rgb(0xdb, 0x27, 0x77),
    },
    Category {
        name: "health",
        color: Rgb(0x14, 0xb8, 0xa6),
    },
    Category {
        name: "history",
        color: Rgb(0xf9, 0x73, 0x16),
    },
    Category {
        name: "news",
        color: Rgb(0x8b, 0x5c, 0xf6),
    },
];

pub fn all() -> &'static [Category] {
    &CATEGORIES
}

pub fn find(name: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.name == name)
}

pub fn color_of(name: &str) -> Result<Rgb, IntegrityError> {
    find(name)
        .map(|c| c.color)
        .ok_or_else(|| IntegrityError::UnknownCategory(name.to_owned()))
}

/// Position of `category` in the registry.
pub fn index_of(category: &Category) -> usize {
    CATEGORIES
        .iter()
        .position(|c| c.name == category.name)
        .unwrap_or_default()
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}
