//! # Address Synchronizer
//!
//! Maps [`FilterValues`] to and from the page's navigable address, so
//! filters survive reload and views can be shared. The core never touches a
//! navigation runtime directly: it reads and replaces parameters through
//! the injected [`AddressPort`].
//!
//! Query parameter schema:
//! - `minPrice` / `maxPrice` — price range bounds, absent at full range
//! - `<facetId>` repeated — checkbox selections, one value per option
//! - `inStock=true` — out-of-stock exclusion flag, absent when false
//!
//! Writes replace the whole filter-owned key set; non-filter parameters
//! (e.g. `subcategory`) pass through untouched.

use crate::facets::{FacetBody, FacetSection, PRICE_FACET};
use crate::state::{FilterValue, FilterValues, STOCK_FLAG};

pub const MIN_PRICE_PARAM: &str = "minPrice";
pub const MAX_PRICE_PARAM: &str = "maxPrice";

/// An ordered multimap of query parameters with a query-string codec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    entries: Vec<(String, String)>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `key=value&key=value` query string. Percent-encoded bytes
    /// are decoded; entries without a key are dropped.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut map = Self::new();
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = match pair.split_once('=') {
                Some((k, v)) => (k, v),
                None => (pair, ""),
            };
            if key.is_empty() {
                continue;
            }
            map.append(decode(key), decode(value));
        }
        map
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// First value for a key, if any.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values for a repeated key, in order.
    pub fn all(&self, key: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn remove_key(&mut self, key: &str) {
        self.entries.retain(|(k, _)| k != key);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl std::fmt::Display for ParamMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_query_string())
    }
}

fn decode(s: &str) -> String {
    urlencoding::decode(s)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| s.to_string())
}

/// Abstract navigable address. `replace` overwrites the current entry
/// rather than pushing history, so every checkbox click does not pollute
/// back-navigation.
pub trait AddressPort {
    fn read(&self) -> ParamMap;
    fn replace(&mut self, params: ParamMap);
}

/// Address backed by a plain value; what the CLI and tests use.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAddress {
    params: ParamMap,
}

impl InMemoryAddress {
    pub fn new(params: ParamMap) -> Self {
        Self { params }
    }
}

impl AddressPort for InMemoryAddress {
    fn read(&self) -> ParamMap {
        self.params.clone()
    }

    fn replace(&mut self, params: ParamMap) {
        self.params = params;
    }
}

/// Serializes the filter map to query parameters.
pub fn serialize(values: &FilterValues) -> ParamMap {
    let mut params = ParamMap::new();
    for (facet, value) in values.iter() {
        match value {
            FilterValue::Range { min, max } => {
                // Only the price facet is a range; its parameters carry
                // dedicated names rather than the facet id.
                params.append(MIN_PRICE_PARAM, min.to_string());
                params.append(MAX_PRICE_PARAM, max.to_string());
            }
            FilterValue::Options(ids) => {
                for id in ids {
                    params.append(facet.clone(), id.clone());
                }
            }
            FilterValue::Flag(true) => params.append(STOCK_FLAG, "true"),
            FilterValue::Flag(false) => {}
        }
    }
    params
}

/// Reads filter parameters back against a freshly built facet catalog.
/// Unknown keys are ignored; stale option ids are dropped; unparseable
/// price bounds fall back to the facet bounds.
pub fn deserialize(params: &ParamMap, sections: &[FacetSection]) -> FilterValues {
    let mut values = FilterValues::default();
    for section in sections {
        match &section.body {
            FacetBody::Range(range) => {
                if section.id != PRICE_FACET {
                    continue;
                }
                let min_param = params.first(MIN_PRICE_PARAM);
                let max_param = params.first(MAX_PRICE_PARAM);
                if min_param.is_none() && max_param.is_none() {
                    continue;
                }
                let min = min_param
                    .and_then(|s| s.parse::<u32>().ok())
                    .unwrap_or(range.min)
                    .min(range.max);
                let max = max_param
                    .and_then(|s| s.parse::<u32>().ok())
                    .unwrap_or(range.max)
                    .min(range.max);
                let (min, max) = if min > max { (max, min) } else { (min, max) };
                if min != range.min || max != range.max {
                    values.insert(section.id.clone(), FilterValue::Range { min, max });
                }
            }
            FacetBody::Checkbox { options } => {
                let requested = params.all(&section.id);
                if requested.is_empty() {
                    continue;
                }
                // Keep canonical option order so the result matches what
                // the state store would derive.
                let ids: Vec<String> = options
                    .iter()
                    .filter(|o| requested.iter().any(|r| *r == o.id))
                    .map(|o| o.id.clone())
                    .collect();
                if !ids.is_empty() {
                    values.insert(section.id.clone(), FilterValue::Options(ids));
                }
            }
        }
    }
    if params.first(STOCK_FLAG) == Some("true") {
        values.insert(STOCK_FLAG, FilterValue::Flag(true));
    }
    values
}

/// Every parameter key this engine owns for the given facet catalog.
fn filter_param_keys(sections: &[FacetSection]) -> Vec<String> {
    let mut keys = vec![
        MIN_PRICE_PARAM.to_string(),
        MAX_PRICE_PARAM.to_string(),
        STOCK_FLAG.to_string(),
    ];
    for section in sections {
        if matches!(section.body, FacetBody::Checkbox { .. }) {
            keys.push(section.id.clone());
        }
    }
    keys
}

/// Synchronizes the address with the current filter map: deletes every
/// filter-owned key, appends the new serialization, and replaces the
/// address entry. Synchronous by design; never debounced.
pub fn write_address<A: AddressPort>(
    port: &mut A,
    sections: &[FacetSection],
    values: &FilterValues,
) {
    let mut params = port.read();
    for key in filter_param_keys(sections) {
        params.remove_key(&key);
    }
    for (key, value) in serialize(values).iter() {
        params.append(key, value);
    }
    port.replace(params);
}

/// Whether any filter-owned parameter is present (mount-time restore check).
pub fn has_filter_params(params: &ParamMap, sections: &[FacetSection]) -> bool {
    filter_param_keys(sections)
        .iter()
        .any(|key| params.contains_key(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facets::build_facets;
    use crate::model::Scope;
    use crate::state::FilterState;
    use crate::store::memory::fixtures::ItemFixture;

    fn sections() -> Vec<FacetSection> {
        let items = vec![
            ItemFixture::named("A")
                .color("Red")
                .brand("Acme")
                .price(417)
                .build(),
            ItemFixture::named("B")
                .color("Blue")
                .brand("Bolt")
                .price(880)
                .attr("material", "Cotton")
                .build(),
        ];
        build_facets(&items, &Scope::default())
    }

    #[test]
    fn query_string_codec_round_trips() {
        let mut params = ParamMap::new();
        params.append("color", "Navy Blue");
        params.append("color", "Red");
        params.append("minPrice", "100");

        let query = params.to_query_string();
        assert_eq!(query, "color=Navy%20Blue&color=Red&minPrice=100");
        assert_eq!(ParamMap::parse(&query), params);
        assert_eq!(ParamMap::parse(&format!("?{}", query)), params);
    }

    #[test]
    fn serialize_emits_the_documented_schema() {
        let mut values = FilterValues::default();
        values.insert("color", FilterValue::Options(vec!["Red".into()]));
        values.insert(PRICE_FACET, FilterValue::Range { min: 0, max: 500 });
        values.insert(STOCK_FLAG, FilterValue::Flag(true));

        let params = serialize(&values);
        assert_eq!(params.all("color"), vec!["Red"]);
        assert_eq!(params.first(MIN_PRICE_PARAM), Some("0"));
        assert_eq!(params.first(MAX_PRICE_PARAM), Some("500"));
        assert_eq!(params.first(STOCK_FLAG), Some("true"));
    }

    #[test]
    fn filter_values_round_trip_through_the_address() {
        let sections = sections();
        let mut state = FilterState::from_sections(sections.clone());
        let mut values = FilterValues::default();
        values.insert("color", FilterValue::Options(vec!["Red".into()]));
        values.insert("material", FilterValue::Options(vec!["Cotton".into()]));
        values.insert(PRICE_FACET, FilterValue::Range { min: 100, max: 500 });
        values.insert(STOCK_FLAG, FilterValue::Flag(true));
        state.apply_values(&values);
        let canonical = state.values();

        let restored = deserialize(&serialize(&canonical), &sections);
        assert_eq!(restored, canonical);
    }

    #[test]
    fn malformed_price_bounds_fall_back_to_facet_bounds() {
        let sections = sections();
        let mut params = ParamMap::new();
        params.append(MIN_PRICE_PARAM, "banana");
        params.append(MAX_PRICE_PARAM, "500");

        let values = deserialize(&params, &sections);
        assert_eq!(
            values.get(PRICE_FACET),
            Some(&FilterValue::Range { min: 0, max: 500 })
        );
    }

    #[test]
    fn oversized_price_bounds_clamp_to_the_facet_max() {
        // Facet bounds are [0, 900]; both handles land on the max.
        let sections = sections();
        let mut params = ParamMap::new();
        params.append(MIN_PRICE_PARAM, "5000");

        let values = deserialize(&params, &sections);
        assert_eq!(
            values.get(PRICE_FACET),
            Some(&FilterValue::Range { min: 900, max: 900 })
        );
    }

    #[test]
    fn stale_keys_and_options_are_ignored() {
        let sections = sections();
        let mut params = ParamMap::new();
        params.append("discontinued", "x");
        params.append("color", "Chartreuse");
        params.append("color", "Blue");

        let values = deserialize(&params, &sections);
        assert_eq!(values.len(), 1);
        assert_eq!(
            values.get("color"),
            Some(&FilterValue::Options(vec!["Blue".into()]))
        );
    }

    #[test]
    fn write_address_replaces_filter_keys_and_keeps_foreign_ones() {
        let sections = sections();
        let mut initial = ParamMap::new();
        initial.append("subcategory", "Phones");
        initial.append("color", "Blue");
        initial.append(MIN_PRICE_PARAM, "50");
        initial.append(MAX_PRICE_PARAM, "300");
        let mut port = InMemoryAddress::new(initial);

        let mut values = FilterValues::default();
        values.insert("color", FilterValue::Options(vec!["Red".into()]));
        write_address(&mut port, &sections, &values);

        let written = port.read();
        assert_eq!(written.first("subcategory"), Some("Phones"));
        assert_eq!(written.all("color"), vec!["Red"]);
        assert!(!written.contains_key(MIN_PRICE_PARAM));
        assert!(!written.contains_key(MAX_PRICE_PARAM));

        // Clearing all filters leaves only the foreign key behind.
        write_address(&mut port, &sections, &FilterValues::default());
        let written = port.read();
        assert_eq!(written.first("subcategory"), Some("Phones"));
        assert!(!written.contains_key("color"));
    }

    #[test]
    fn detects_presence_of_filter_params() {
        let sections = sections();
        let mut params = ParamMap::new();
        params.append("subcategory", "Phones");
        assert!(!has_filter_params(&params, &sections));
        params.append("brand", "Acme");
        assert!(has_filter_params(&params, &sections));
    }
}
