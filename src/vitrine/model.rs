use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A free-form attribute value attached to an item (e.g. screenSize, material).
///
/// Upstream catalogs deliver these as loosely typed JSON scalars, so the
/// variants mirror exactly that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl AttrValue {
    /// The value as it appears in facet options and query parameters.
    pub fn as_option_id(&self) -> String {
        match self {
            AttrValue::Text(s) => s.clone(),
            AttrValue::Flag(b) => b.to_string(),
            AttrValue::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        }
    }
}

/// One catalog item, read-only within this crate. Ownership of the data
/// belongs to the catalog collaborator; we only filter and present it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    pub brand: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub storage: Option<String>,
    pub our_price: u32,
    #[serde(default)]
    pub mrp: u32,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub stock: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttrValue>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Item {
    pub fn new(name: String, category: String, brand: String, our_price: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description: String::new(),
            category,
            subcategory: String::new(),
            brand,
            color: String::new(),
            storage: None,
            our_price,
            mrp: our_price,
            rating: 0.0,
            stock: 0,
            created_at: Utc::now(),
            attributes: BTreeMap::new(),
            tags: Vec::new(),
        }
    }

    /// Average rating floored to a whole star, clamped to [1, 5].
    /// Used both for facet derivation and the rating predicate.
    pub fn floored_rating(&self) -> u8 {
        (self.rating.floor() as i64).clamp(1, 5) as u8
    }
}

/// Category/subcategory restriction applied before facet computation and
/// filtering. An unset field matches everything at that level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

impl Scope {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            subcategory: None,
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        if let Some(cat) = &self.category {
            if !item.category.eq_ignore_ascii_case(cat) {
                return false;
            }
        }
        if let Some(sub) = &self.subcategory {
            if !item.subcategory.eq_ignore_ascii_case(sub) {
                return false;
            }
        }
        true
    }
}

/// How the result set is ordered. `Featured` preserves upstream order,
/// which may encode merchandising priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    Rating,
    Newest,
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SortOption::Featured => "featured",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::Rating => "rating",
            SortOption::Newest => "newest",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(SortOption::Featured),
            "price-asc" => Ok(SortOption::PriceAsc),
            "price-desc" => Ok(SortOption::PriceDesc),
            "rating" => Ok(SortOption::Rating),
            "newest" => Ok(SortOption::Newest),
            other => Err(format!("Unknown sort option: {}", other)),
        }
    }
}
