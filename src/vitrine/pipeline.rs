//! # Filter/Sort Pipeline
//!
//! The pure heart of the engine: `(items, scope, filter values, sort,
//! query) → ordered result set`. Each stage narrows the previous stage's
//! output; an absent facet value means "no constraint" and the stage is
//! skipped. Page slicing lives in [`crate::listing`].
//!
//! Invocation is debounced upstream (see [`crate::debounce`]); this module
//! knows nothing about scheduling.

use crate::facets::{BRAND_FACET, CATEGORY_FACET, COLOR_FACET, PRICE_FACET, RATING_FACET, STORAGE_FACET};
use crate::model::{Item, Scope, SortOption};
use crate::state::{FilterValue, FilterValues, STOCK_FLAG};

/// Runs the full filter → sort pipeline over the snapshot.
///
/// `Featured` sort must not disturb input order: upstream ordering may
/// encode merchandising priority.
pub fn run(
    items: &[Item],
    scope: &Scope,
    values: &FilterValues,
    sort: SortOption,
    query: &str,
) -> Vec<Item> {
    let tokens = query_tokens(query);

    let mut out: Vec<Item> = items
        .iter()
        .filter(|item| scope.matches(item))
        .filter(|item| matches_query(item, &tokens))
        .filter(|item| matches_values(item, values))
        .cloned()
        .collect();

    match sort {
        SortOption::Featured => {}
        SortOption::PriceAsc => out.sort_by_key(|i| i.our_price),
        SortOption::PriceDesc => out.sort_by(|a, b| b.our_price.cmp(&a.our_price)),
        SortOption::Rating => out.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortOption::Newest => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }

    out
}

/// Whitespace-tokenized, lower-cased, stripped to alphanumerics. Empty
/// tokens disappear, so a query of punctuation matches everything.
fn query_tokens(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|t| {
            t.chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(|c| c.to_lowercase())
                .collect::<String>()
        })
        .filter(|t| !t.is_empty())
        .collect()
}

/// Every token must appear somewhere in the item's searchable text
/// (AND across tokens, OR across fields per token).
fn matches_query(item: &Item, tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return true;
    }
    let haystack = format!(
        "{} {} {} {} {} {}",
        item.name,
        item.category,
        item.subcategory,
        item.brand,
        item.description,
        item.tags.join(" ")
    )
    .to_lowercase();
    tokens.iter().all(|t| haystack.contains(t))
}

fn matches_values(item: &Item, values: &FilterValues) -> bool {
    for (facet, value) in values.iter() {
        let ok = match (facet.as_str(), value) {
            (PRICE_FACET, FilterValue::Range { min, max }) => {
                *min <= item.our_price && item.our_price <= *max
            }
            (STOCK_FLAG, FilterValue::Flag(flag)) => !*flag || item.stock > 0,
            (RATING_FACET, FilterValue::Options(ids)) => matches_rating(item, ids),
            (_, FilterValue::Options(ids)) => facet_field(item, facet)
                .map(|field| ids.iter().any(|id| id.eq_ignore_ascii_case(&field)))
                .unwrap_or(false),
            // A range or flag under any other key has no predicate here.
            _ => true,
        };
        if !ok {
            return false;
        }
    }
    true
}

/// Floored rating must reach the lowest selected threshold ("N Stars & Up"
/// selections widen, not narrow, each other).
fn matches_rating(item: &Item, ids: &[String]) -> bool {
    let min_threshold = ids.iter().filter_map(|id| id.parse::<u8>().ok()).min();
    match min_threshold {
        Some(threshold) => item.floored_rating() >= threshold,
        None => true,
    }
}

/// The item field a checkbox facet constrains. `None` means the item lacks
/// the field and is excluded from that facet's matches.
fn facet_field(item: &Item, facet: &str) -> Option<String> {
    match facet {
        CATEGORY_FACET => Some(item.category.clone()),
        COLOR_FACET => (!item.color.is_empty()).then(|| item.color.clone()),
        STORAGE_FACET => item.storage.clone(),
        BRAND_FACET => (!item.brand.is_empty()).then(|| item.brand.clone()),
        _ => item.attributes.get(facet).map(|v| v.as_option_id()),
    }
}
