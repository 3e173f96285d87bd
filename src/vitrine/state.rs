//! # Filter State Store
//!
//! Owns per-facet UI state (expanded, view-more) and selection state
//! (checked options, price sub-range, stock flag). All mutation goes
//! through the pure [`reduce`] function; the returned [`Effect`] tells the
//! caller whether the address must be rewritten and the pipeline re-armed.
//!
//! The serializable record of "what the user has chosen" is
//! [`FilterValues`], derived on demand from the state. Empty selections,
//! full ranges, and a false stock flag are omitted from it, never stored.

use crate::facets::{FacetBody, FacetSection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pseudo facet key for the global out-of-stock exclusion flag.
pub const STOCK_FLAG: &str = "inStock";

/// One selected constraint in the canonical filter map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterValue {
    Options(Vec<String>),
    Range { min: u32, max: u32 },
    Flag(bool),
}

/// Facet id → active constraint. The canonical, serializable selection
/// record; facet UI state is deliberately not part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterValues(pub BTreeMap<String, FilterValue>);

impl FilterValues {
    pub fn get(&self, facet: &str) -> Option<&FilterValue> {
        self.0.get(facet)
    }

    pub fn insert(&mut self, facet: impl Into<String>, value: FilterValue) {
        self.0.insert(facet.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter()
    }
}

/// A user interaction against the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// Collapse/expand a facet's option list. Cosmetic.
    ToggleExpanded { facet: String },
    /// Flip between 5 visible options and all of them. Cosmetic.
    ToggleShowAll { facet: String },
    /// Flip one checkbox option.
    ToggleOption { facet: String, option: String },
    /// Move the range facet's handles.
    SetRange { facet: String, min: u32, max: u32 },
    /// Set the global out-of-stock exclusion flag.
    SetExcludeOutOfStock(bool),
    /// Reset every selection and all UI state to defaults.
    ClearAll,
}

/// What the caller owes after a reduction: `Refresh` means write the
/// address, reset the page, and arm the debounced pipeline trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub sections: Vec<FacetSection>,
    pub exclude_out_of_stock: bool,
}

impl FilterState {
    pub fn from_sections(sections: Vec<FacetSection>) -> Self {
        Self {
            sections,
            exclude_out_of_stock: false,
        }
    }

    pub fn section(&self, id: &str) -> Option<&FacetSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Derives the canonical filter map. Facets with nothing selected and
    /// ranges at their full bounds contribute nothing.
    pub fn values(&self) -> FilterValues {
        let mut values = FilterValues::default();
        for section in &self.sections {
            match &section.body {
                FacetBody::Checkbox { .. } => {
                    let checked = section.checked_option_ids();
                    if !checked.is_empty() {
                        values.insert(section.id.clone(), FilterValue::Options(checked));
                    }
                }
                FacetBody::Range(range) => {
                    if !range.is_full() {
                        values.insert(
                            section.id.clone(),
                            FilterValue::Range {
                                min: range.current_min,
                                max: range.current_max,
                            },
                        );
                    }
                }
            }
        }
        if self.exclude_out_of_stock {
            values.insert(STOCK_FLAG, FilterValue::Flag(true));
        }
        values
    }

    /// Number of active constraints, for the badge next to "Filters".
    pub fn active_count(&self) -> usize {
        self.values().len()
    }

    /// Seeds selections from a deserialized filter map (mount restore).
    /// Unknown facets and stale option ids are ignored; range inputs are
    /// clamped to the facet bounds.
    pub fn apply_values(&mut self, values: &FilterValues) {
        for (facet, value) in values.iter() {
            if facet == STOCK_FLAG {
                if let FilterValue::Flag(b) = value {
                    self.exclude_out_of_stock = *b;
                }
                continue;
            }
            let Some(section) = self.sections.iter_mut().find(|s| &s.id == facet) else {
                continue;
            };
            match (&mut section.body, value) {
                (FacetBody::Checkbox { options }, FilterValue::Options(ids)) => {
                    for option in options.iter_mut() {
                        option.checked = ids.iter().any(|id| id == &option.id);
                    }
                }
                (FacetBody::Range(range), FilterValue::Range { min, max }) => {
                    let (min, max) = clamp_range(*min, *max, range.max);
                    range.current_min = min;
                    range.current_max = max;
                }
                _ => {}
            }
        }
    }
}

/// Pure state transition. Returns the successor state and the effect the
/// caller must honor.
pub fn reduce(state: &FilterState, event: &FilterEvent) -> (FilterState, Effect) {
    let mut next = state.clone();
    let effect = match event {
        FilterEvent::ToggleExpanded { facet } => {
            if let Some(section) = next.sections.iter_mut().find(|s| &s.id == facet) {
                section.expanded = !section.expanded;
            }
            Effect::None
        }
        FilterEvent::ToggleShowAll { facet } => {
            if let Some(section) = next.sections.iter_mut().find(|s| &s.id == facet) {
                section.show_all = !section.show_all;
            }
            Effect::None
        }
        FilterEvent::ToggleOption { facet, option } => {
            let mut changed = false;
            if let Some(section) = next.sections.iter_mut().find(|s| &s.id == facet) {
                if let FacetBody::Checkbox { options } = &mut section.body {
                    if let Some(opt) = options.iter_mut().find(|o| &o.id == option) {
                        opt.checked = !opt.checked;
                        changed = true;
                    }
                }
            }
            if changed {
                Effect::Refresh
            } else {
                Effect::None
            }
        }
        FilterEvent::SetRange { facet, min, max } => {
            let mut changed = false;
            if let Some(section) = next.sections.iter_mut().find(|s| &s.id == facet) {
                if let FacetBody::Range(range) = &mut section.body {
                    let (min, max) = clamp_range(*min, *max, range.max);
                    changed = range.current_min != min || range.current_max != max;
                    range.current_min = min;
                    range.current_max = max;
                }
            }
            if changed {
                Effect::Refresh
            } else {
                Effect::None
            }
        }
        FilterEvent::SetExcludeOutOfStock(flag) => {
            let changed = next.exclude_out_of_stock != *flag;
            next.exclude_out_of_stock = *flag;
            if changed {
                Effect::Refresh
            } else {
                Effect::None
            }
        }
        FilterEvent::ClearAll => {
            for section in &mut next.sections {
                section.expanded = true;
                section.show_all = false;
                match &mut section.body {
                    FacetBody::Checkbox { options } => {
                        for option in options.iter_mut() {
                            option.checked = false;
                        }
                    }
                    FacetBody::Range(range) => {
                        range.current_min = range.min;
                        range.current_max = range.max;
                    }
                }
            }
            next.exclude_out_of_stock = false;
            Effect::Refresh
        }
    };
    (next, effect)
}

/// Clamps both handles into `[0, bound]`, swapping when they cross.
fn clamp_range(min: u32, max: u32, bound: u32) -> (u32, u32) {
    let min = min.min(bound);
    let max = max.min(bound);
    if min > max {
        (max, min)
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facets::{build_facets, PRICE_FACET};
    use crate::model::Scope;
    use crate::store::memory::fixtures::ItemFixture;

    fn state() -> FilterState {
        let items = vec![
            ItemFixture::named("A").color("Red").price(417).build(),
            ItemFixture::named("B").color("Blue").price(880).build(),
        ];
        FilterState::from_sections(build_facets(&items, &Scope::default()))
    }

    #[test]
    fn fresh_state_has_no_active_filters() {
        let state = state();
        assert!(state.values().is_empty());
        assert_eq!(state.active_count(), 0);
    }

    #[test]
    fn toggling_an_option_refreshes_and_registers() {
        let (next, effect) = reduce(
            &state(),
            &FilterEvent::ToggleOption {
                facet: "color".into(),
                option: "Red".into(),
            },
        );
        assert_eq!(effect, Effect::Refresh);
        assert_eq!(
            next.values().get("color"),
            Some(&FilterValue::Options(vec!["Red".into()]))
        );
        assert_eq!(next.active_count(), 1);
    }

    #[test]
    fn toggling_an_unknown_option_is_a_no_op() {
        let s = state();
        let (next, effect) = reduce(
            &s,
            &FilterEvent::ToggleOption {
                facet: "color".into(),
                option: "Chartreuse".into(),
            },
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(next, s);
    }

    #[test]
    fn cosmetic_events_do_not_refresh() {
        let s = state();
        let (next, effect) = reduce(
            &s,
            &FilterEvent::ToggleExpanded {
                facet: "color".into(),
            },
        );
        assert_eq!(effect, Effect::None);
        // UI state changed, selections did not.
        assert!(!next.section("color").unwrap().expanded);
        assert!(next.values().is_empty());

        let (_, effect) = reduce(
            &s,
            &FilterEvent::ToggleShowAll {
                facet: "color".into(),
            },
        );
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn set_range_clamps_and_swaps() {
        // Bounds are [0, 900] (880 rounded up to the nearest 100).
        let (next, effect) = reduce(
            &state(),
            &FilterEvent::SetRange {
                facet: PRICE_FACET.into(),
                min: 700,
                max: 5000,
            },
        );
        assert_eq!(effect, Effect::Refresh);
        assert_eq!(
            next.values().get(PRICE_FACET),
            Some(&FilterValue::Range { min: 700, max: 900 })
        );

        // Crossed handles are swapped, never stored inverted.
        let (next, _) = reduce(
            &next,
            &FilterEvent::SetRange {
                facet: PRICE_FACET.into(),
                min: 600,
                max: 200,
            },
        );
        assert_eq!(
            next.values().get(PRICE_FACET),
            Some(&FilterValue::Range { min: 200, max: 600 })
        );
    }

    #[test]
    fn full_range_is_omitted_from_values() {
        let (next, _) = reduce(
            &state(),
            &FilterEvent::SetRange {
                facet: PRICE_FACET.into(),
                min: 0,
                max: u32::MAX,
            },
        );
        assert!(next.values().get(PRICE_FACET).is_none());
    }

    #[test]
    fn stock_flag_round_trips_through_values() {
        let (next, effect) = reduce(&state(), &FilterEvent::SetExcludeOutOfStock(true));
        assert_eq!(effect, Effect::Refresh);
        assert_eq!(next.values().get(STOCK_FLAG), Some(&FilterValue::Flag(true)));

        // Setting it to the same value again changes nothing.
        let (_, effect) = reduce(&next, &FilterEvent::SetExcludeOutOfStock(true));
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn clear_all_is_idempotent() {
        let (s, _) = reduce(
            &state(),
            &FilterEvent::ToggleOption {
                facet: "color".into(),
                option: "Red".into(),
            },
        );
        let (s, _) = reduce(&s, &FilterEvent::SetExcludeOutOfStock(true));

        let (once, effect) = reduce(&s, &FilterEvent::ClearAll);
        assert_eq!(effect, Effect::Refresh);
        assert!(once.values().is_empty());

        let (twice, _) = reduce(&once, &FilterEvent::ClearAll);
        assert_eq!(once, twice);
    }

    #[test]
    fn apply_values_seeds_and_ignores_stale_keys() {
        let mut s = state();
        let mut values = FilterValues::default();
        values.insert(
            "color",
            FilterValue::Options(vec!["Blue".into(), "Magenta".into()]),
        );
        values.insert("discontinuedFacet", FilterValue::Options(vec!["x".into()]));
        values.insert(PRICE_FACET, FilterValue::Range { min: 100, max: 9999 });
        values.insert(STOCK_FLAG, FilterValue::Flag(true));

        s.apply_values(&values);
        let derived = s.values();
        assert_eq!(
            derived.get("color"),
            Some(&FilterValue::Options(vec!["Blue".into()]))
        );
        assert_eq!(
            derived.get(PRICE_FACET),
            Some(&FilterValue::Range { min: 100, max: 900 })
        );
        assert_eq!(derived.get(STOCK_FLAG), Some(&FilterValue::Flag(true)));
        assert!(derived.get("discontinuedFacet").is_none());
    }
}
