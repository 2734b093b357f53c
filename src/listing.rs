//! Pagination and the per-page listing state.
//!
//! Pagination is cumulative ("load more"): page N shows the first N pages,
//! not a sliding window.

use crate::catalog::api::LoadError;
use crate::catalog::model::{Record, RecordId};
use crate::filter::{self, Criteria, QuickFilter};
use crate::stats::{self, Summary};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

pub const DEFAULT_PAGE_SIZE: usize = 6;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, strum::EnumString, strum::Display, strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    page: usize,
    view_mode: ViewMode,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    /// A page size of 0 is raised to 1
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 1,
            view_mode: ViewMode::default(),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn advance(&mut self) {
        self.page += 1;
    }

    pub fn switch_view(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    /// How many of `total` records the current page shows
    pub fn shown(&self, total: usize) -> usize {
        self.page.saturating_mul(self.page_size).min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.page.saturating_mul(self.page_size) < total
    }

    pub fn visible<'a, T>(&self, filtered: &'a [T]) -> &'a [T] {
        &filtered[..self.shown(filtered.len())]
    }
}

/// What a listing container should currently display
#[derive(Debug)]
pub enum ListingState<'a, R> {
    NotLoaded,
    Failed(&'a LoadError),
    NoResults,
    Showing {
        records: Vec<&'a R>,
        has_more: bool,
        total: usize,
    },
}

#[derive(Debug)]
enum LoadStatus {
    NotLoaded,
    Loaded,
    Failed(LoadError),
}

/// Identifies one load request; only the latest ticket may commit its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Caller-owned state of one listing page: the loaded records, the active
/// criteria and the pager.
#[derive(Debug)]
pub struct Listing<R> {
    records: Vec<R>,
    status: LoadStatus,
    criteria: Criteria,
    pager: Pager,
    generation: u64,
}

impl<R: Record> Default for Listing<R> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<R: Record> Listing<R> {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            status: LoadStatus::NotLoaded,
            criteria: Criteria::all(),
            pager: Pager::new(page_size),
            generation: 0,
        }
    }

    /// Starts a load, superseding any load still in flight
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        debug!("Starting load #{}", self.generation);

        LoadTicket(self.generation)
    }

    /**
    Commits the outcome of a load.
    Returns `false` when a newer load was started since `ticket` was issued,
    in which case the result is dropped.
    */
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<R>, LoadError>) -> bool {
        if ticket.0 != self.generation {
            warn!(
                "Dropping result of load #{}, load #{} is newer",
                ticket.0, self.generation
            );
            return false;
        }

        match result {
            Ok(records) => {
                info!("Listing holds {} records", records.len());
                self.records = records;
                self.status = LoadStatus::Loaded;
            }
            Err(err) => {
                warn!("Load failed, showing the error state: {}", err);
                self.records.clear();
                self.status = LoadStatus::Failed(err);
            }
        }
        self.pager.reset();

        true
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn view_mode(&self) -> ViewMode {
        self.pager.view_mode()
    }

    pub fn set_criteria(&mut self, criteria: Criteria) {
        self.criteria = criteria;
        self.pager.reset();
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.criteria = self.criteria.clone().with_search_term(term);
        self.pager.reset();
    }

    /// Replaces every other criterion, as the quick filter buttons do
    pub fn set_quick_filter(&mut self, quick_filter: QuickFilter) {
        self.set_criteria(quick_filter.criteria());
    }

    pub fn reset_filters(&mut self) {
        self.set_criteria(Criteria::all());
    }

    pub fn load_more(&mut self) {
        self.pager.advance();
    }

    pub fn switch_view(&mut self, view_mode: ViewMode) {
        self.pager.switch_view(view_mode);
    }

    pub fn filtered(&self, today: NaiveDate) -> Vec<&R> {
        filter::apply(&self.records, &self.criteria, today)
    }

    pub fn state(&self, today: NaiveDate) -> ListingState<'_, R> {
        match &self.status {
            LoadStatus::NotLoaded => ListingState::NotLoaded,
            LoadStatus::Failed(err) => ListingState::Failed(err),
            LoadStatus::Loaded => {
                let mut records = self.filtered(today);
                let total = records.len();

                if total == 0 {
                    return ListingState::NoResults;
                }

                records.truncate(self.pager.shown(total));

                ListingState::Showing {
                    records,
                    has_more: self.pager.has_more(total),
                    total,
                }
            }
        }
    }

    /// Stats over every loaded record, regardless of the criteria
    pub fn summary(&self, today: NaiveDate) -> Summary {
        stats::summarize(&self.records, today)
    }

    pub fn find(&self, id: &RecordId) -> Option<&R> {
        filter::find_by_id(&self.records, id)
    }
}
