//! # Listing Session
//!
//! The composed filter+listing view: a thin facade that owns the snapshot,
//! the filter state, the debounced pipeline trigger, and the address port,
//! and wires them together across the view lifecycle:
//!
//! - seeded once from the address on mount,
//! - every selection change writes the address synchronously and arms the
//!   debouncer (the URL reflects the latest click even before the list
//!   recomputes),
//! - the pipeline itself only runs when [`ListingSession::tick`] observes
//!   an elapsed debounce window, so a burst of edits costs one run.
//!
//! Generic over [`CatalogSource`] and [`AddressPort`], so the whole thing
//! is testable without a UI runtime.

use crate::config::VitrineConfig;
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::facets::{build_facets, FacetSection};
use crate::listing::{page_view, PageView};
use crate::model::{Item, Scope, SortOption};
use crate::params::{self, AddressPort, ParamMap};
use crate::pipeline;
use crate::state::{reduce, Effect, FilterEvent, FilterState};
use crate::store::CatalogSource;
use std::time::Instant;

/// External, read-only scope parameter (written by navigation, not by us).
const SUBCATEGORY_PARAM: &str = "subcategory";

pub struct ListingSession<C: CatalogSource, A: AddressPort> {
    catalog: C,
    address: A,
    scope: Scope,
    items: Vec<Item>,
    state: FilterState,
    sort: SortOption,
    query: String,
    page: usize,
    page_size: usize,
    debouncer: Debouncer,
    results: Vec<Item>,
}

impl<C: CatalogSource, A: AddressPort> ListingSession<C, A> {
    /// Loads the snapshot, builds the facet catalog for the scope, seeds
    /// selections from the address if filter parameters are present, and
    /// runs the pipeline exactly once. The debouncer is never armed during
    /// mount.
    pub fn mount(catalog: C, address: A, scope: Scope, config: &VitrineConfig) -> Result<Self> {
        let items = catalog.items()?;
        let current = address.read();

        let mut scope = scope;
        if scope.subcategory.is_none() {
            if let Some(sub) = current.first(SUBCATEGORY_PARAM) {
                scope.subcategory = Some(sub.to_string());
            }
        }

        let mut state = FilterState::from_sections(build_facets(&items, &scope));
        if params::has_filter_params(&current, &state.sections) {
            let values = params::deserialize(&current, &state.sections);
            state.apply_values(&values);
        }

        let mut session = Self {
            catalog,
            address,
            scope,
            items,
            state,
            sort: SortOption::default(),
            query: String::new(),
            page: 1,
            page_size: config.page_size,
            debouncer: Debouncer::new(config.debounce_window()),
            results: Vec::new(),
        };
        session.run_pipeline();
        Ok(session)
    }

    /// Applies one filter-panel interaction. Selection-changing events
    /// write the address immediately, reset the page, and arm the
    /// debounced pipeline trigger; cosmetic events do neither.
    pub fn dispatch(&mut self, event: FilterEvent, now: Instant) {
        let (next, effect) = reduce(&self.state, &event);
        self.state = next;
        if effect == Effect::Refresh {
            self.on_filter_change(now);
        }
    }

    pub fn set_query(&mut self, query: &str, now: Instant) {
        if self.query == query {
            return;
        }
        self.query = query.to_string();
        self.page = 1;
        self.debouncer.trigger(now);
    }

    pub fn set_sort(&mut self, sort: SortOption, now: Instant) {
        if self.sort == sort {
            return;
        }
        self.sort = sort;
        self.page = 1;
        self.debouncer.trigger(now);
    }

    /// Pagination re-slices the already computed result set; no pipeline
    /// run and no address write.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Category/subcategory navigation. Selections never carry across a
    /// scope change: the facet catalog is rebuilt fresh, the filter
    /// parameters are cleared from the address, and the pipeline runs
    /// immediately (this is navigation, not a slider drag).
    pub fn set_scope(&mut self, scope: Scope) {
        // Stale filter keys from the old facet catalog are removed while
        // it is still known.
        params::write_address(
            &mut self.address,
            &self.state.sections,
            &Default::default(),
        );
        self.scope = scope;
        self.state = FilterState::from_sections(build_facets(&self.items, &self.scope));
        self.page = 1;
        self.debouncer.cancel();
        self.run_pipeline();
    }

    /// Re-fetches the snapshot and rebuilds the facet catalog without
    /// clobbering selections that still exist in the new catalog; options
    /// that disappeared are silently dropped.
    pub fn refresh_catalog(&mut self) -> Result<()> {
        let kept = self.state.values();
        self.items = self.catalog.items()?;
        let mut state = FilterState::from_sections(build_facets(&self.items, &self.scope));
        state.apply_values(&kept);
        self.state = state;
        self.run_pipeline();
        Ok(())
    }

    /// Runs the pipeline if the debounce window has elapsed. Returns true
    /// when a run happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.debouncer.poll(now) {
            self.run_pipeline();
            true
        } else {
            false
        }
    }

    /// Cancels any pending trigger so nothing executes after teardown.
    pub fn unmount(&mut self) {
        self.debouncer.cancel();
    }

    pub fn page_view(&self) -> PageView {
        page_view(&self.results, self.page, self.page_size)
    }

    pub fn sections(&self) -> &[FacetSection] {
        &self.state.sections
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn active_filter_count(&self) -> usize {
        self.state.active_count()
    }

    pub fn has_pending_refresh(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// The canonical query string reproducing this filtered view.
    pub fn share_params(&self) -> ParamMap {
        params::serialize(&self.state.values())
    }

    fn on_filter_change(&mut self, now: Instant) {
        params::write_address(&mut self.address, &self.state.sections, &self.state.values());
        self.page = 1;
        self.debouncer.trigger(now);
    }

    fn run_pipeline(&mut self) {
        self.results = pipeline::run(
            &self.items,
            &self.scope,
            &self.state.values(),
            self.sort,
            &self.query,
        );
    }

    #[cfg(any(test, feature = "test_utils"))]
    pub fn address(&self) -> ParamMap {
        self.address.read()
    }
}
