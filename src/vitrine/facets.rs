//! # Facet Catalog Builder
//!
//! Derives the ordered list of filterable facets from the current item
//! snapshot and scope. Pure: recomputed whenever the snapshot or scope
//! changes, consumed by the filter state store.
//!
//! Known facets come first in a fixed order (price, category, rating,
//! color, storage, brand); any other attribute key found on an in-scope
//! item becomes a dynamic checkbox facet, in key-encounter order.

use crate::model::{Item, Scope};

pub const PRICE_FACET: &str = "price";
pub const CATEGORY_FACET: &str = "category";
pub const RATING_FACET: &str = "rating";
pub const COLOR_FACET: &str = "color";
pub const STORAGE_FACET: &str = "storage";
pub const BRAND_FACET: &str = "brand";

/// Facet ids reserved for the known facets; attribute keys colliding with
/// these never become dynamic facets.
pub const KNOWN_FACETS: [&str; 6] = [
    PRICE_FACET,
    CATEGORY_FACET,
    RATING_FACET,
    COLOR_FACET,
    STORAGE_FACET,
    BRAND_FACET,
];

/// How many options a collapsed "View more" facet shows unless configured
/// otherwise (see `VitrineConfig::visible_options`).
pub const DEFAULT_VISIBLE_OPTIONS: usize = 5;

/// Price slider granularity.
const PRICE_STEP: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOption {
    pub id: String,
    pub label: String,
    pub checked: bool,
}

impl FacetOption {
    fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            checked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeState {
    pub min: u32,
    pub max: u32,
    pub current_min: u32,
    pub current_max: u32,
    pub step: u32,
}

impl RangeState {
    pub fn full(max: u32) -> Self {
        Self {
            min: 0,
            max,
            current_min: 0,
            current_max: max,
            step: PRICE_STEP,
        }
    }

    /// Whether the selected sub-range equals the full bounds.
    pub fn is_full(&self) -> bool {
        self.current_min == self.min && self.current_max == self.max
    }
}

/// Tagged facet body so predicate application stays exhaustive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetBody {
    Checkbox { options: Vec<FacetOption> },
    Range(RangeState),
}

/// One renderable facet: identity, options or range, plus ephemeral UI
/// state (expanded / show-all). UI state is never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetSection {
    pub id: String,
    pub title: String,
    pub body: FacetBody,
    pub expanded: bool,
    pub show_all: bool,
}

impl FacetSection {
    fn checkbox(id: impl Into<String>, title: impl Into<String>, options: Vec<FacetOption>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: FacetBody::Checkbox { options },
            expanded: true,
            show_all: false,
        }
    }

    fn range(id: impl Into<String>, title: impl Into<String>, state: RangeState) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: FacetBody::Range(state),
            expanded: true,
            show_all: false,
        }
    }

    pub fn checked_option_ids(&self) -> Vec<String> {
        match &self.body {
            FacetBody::Checkbox { options } => options
                .iter()
                .filter(|o| o.checked)
                .map(|o| o.id.clone())
                .collect(),
            FacetBody::Range(_) => Vec::new(),
        }
    }

    /// Options currently visible given the "View more/less" toggle and the
    /// configured collapsed limit.
    pub fn visible_options(&self, limit: usize) -> &[FacetOption] {
        match &self.body {
            FacetBody::Checkbox { options } => {
                if self.show_all || options.len() <= limit {
                    options
                } else {
                    &options[..limit]
                }
            }
            FacetBody::Range(_) => &[],
        }
    }
}

/// Builds the ordered facet catalog for the given snapshot and scope.
///
/// Checkbox facets with zero options are omitted; `price` is always
/// emitted, even over an empty scope (bounds collapse to 0).
pub fn build_facets(items: &[Item], scope: &Scope) -> Vec<FacetSection> {
    let in_scope: Vec<&Item> = items.iter().filter(|i| scope.matches(i)).collect();

    let mut sections = Vec::new();

    let max_price = in_scope.iter().map(|i| i.our_price).max().unwrap_or(0);
    sections.push(FacetSection::range(
        PRICE_FACET,
        "Price",
        RangeState::full(round_up_price(max_price)),
    ));

    push_checkbox(
        &mut sections,
        CATEGORY_FACET,
        "Category",
        distinct_values(&in_scope, |i| Some(i.category.clone())),
    );

    let mut stars: Vec<u8> = distinct_values(&in_scope, |i| Some(i.floored_rating().to_string()))
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();
    stars.sort_unstable_by(|a, b| b.cmp(a));
    let rating_options = stars
        .into_iter()
        .map(|n| FacetOption::new(n.to_string(), format!("{} Stars & Up", n)))
        .collect::<Vec<_>>();
    if !rating_options.is_empty() {
        sections.push(FacetSection::checkbox(RATING_FACET, "Rating", rating_options));
    }

    push_checkbox(
        &mut sections,
        COLOR_FACET,
        "Color",
        distinct_values(&in_scope, |i| {
            (!i.color.is_empty()).then(|| i.color.clone())
        }),
    );
    push_checkbox(
        &mut sections,
        STORAGE_FACET,
        "Storage",
        distinct_values(&in_scope, |i| i.storage.clone()),
    );
    push_checkbox(
        &mut sections,
        BRAND_FACET,
        "Brand",
        distinct_values(&in_scope, |i| {
            (!i.brand.is_empty()).then(|| i.brand.clone())
        }),
    );

    for (key, values) in dynamic_attributes(&in_scope) {
        let options = values
            .into_iter()
            .map(|v| FacetOption::new(v.clone(), v))
            .collect::<Vec<_>>();
        if !options.is_empty() {
            sections.push(FacetSection::checkbox(&key, title_from_key(&key), options));
        }
    }

    sections
}

fn push_checkbox(sections: &mut Vec<FacetSection>, id: &str, title: &str, values: Vec<String>) {
    if values.is_empty() {
        return;
    }
    let options = values
        .into_iter()
        .map(|v| FacetOption::new(v.clone(), v))
        .collect();
    sections.push(FacetSection::checkbox(id, title, options));
}

/// Distinct values in encounter order, deduplicated case-insensitively
/// (first spelling wins).
fn distinct_values<F>(items: &[&Item], mut get: F) -> Vec<String>
where
    F: FnMut(&Item) -> Option<String>,
{
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for item in items.iter().copied() {
        if let Some(value) = get(item) {
            let folded = value.to_lowercase();
            if !seen.contains(&folded) {
                seen.push(folded);
                out.push(value);
            }
        }
    }
    out
}

/// Attribute keys not covered by known facets, with their distinct values,
/// in key-encounter order across the in-scope items.
fn dynamic_attributes(items: &[&Item]) -> Vec<(String, Vec<String>)> {
    let mut keys: Vec<String> = Vec::new();
    let mut values: Vec<Vec<String>> = Vec::new();

    for item in items {
        for (key, value) in &item.attributes {
            if KNOWN_FACETS.contains(&key.as_str()) {
                continue;
            }
            let pos = match keys.iter().position(|k| k == key) {
                Some(pos) => pos,
                None => {
                    keys.push(key.clone());
                    values.push(Vec::new());
                    keys.len() - 1
                }
            };
            let id = value.as_option_id();
            if !values[pos].iter().any(|v| v.eq_ignore_ascii_case(&id)) {
                values[pos].push(id);
            }
        }
    }

    keys.into_iter().zip(values).collect()
}

/// Rounds a raw price ceiling up to an aesthetic bound: nearest 100 below
/// 1000, nearest 1000 above.
fn round_up_price(max: u32) -> u32 {
    if max == 0 {
        0
    } else if max < 1000 {
        max.div_ceil(100) * 100
    } else {
        max.div_ceil(1000) * 1000
    }
}

/// "screenSize" -> "Screen Size", "material" -> "Material".
fn title_from_key(key: &str) -> String {
    let mut title = String::new();
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            title.extend(c.to_uppercase());
        } else {
            if c.is_uppercase() {
                title.push(' ');
            }
            title.push(c);
        }
    }
    title
}
