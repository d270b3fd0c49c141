use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::CategoryColors;
use nextload_dashboard::config::DashboardConfig;
use nextload_dashboard::data::aggregate::KeyMetrics;
use nextload_dashboard::data::filter::{FilterOptions, FilterSpec, filter};
use nextload_dashboard::data::loader::SourceCache;
use nextload_dashboard::data::model::LoadTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Analytics tab shown below the key metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyticsTab {
    #[default]
    Geographic,
    Rate,
    Equipment,
    Company,
    Time,
}

impl AnalyticsTab {
    pub const ALL: [AnalyticsTab; 5] = [
        AnalyticsTab::Geographic,
        AnalyticsTab::Rate,
        AnalyticsTab::Equipment,
        AnalyticsTab::Company,
        AnalyticsTab::Time,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            AnalyticsTab::Geographic => "Geographic Analysis",
            AnalyticsTab::Rate => "Rate Analysis",
            AnalyticsTab::Equipment => "Equipment Analysis",
            AnalyticsTab::Company => "Company Analysis",
            AnalyticsTab::Time => "Time Analysis",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    cache: SourceCache,

    /// File the base table was loaded from.
    pub source_path: Option<PathBuf>,

    /// Unfiltered table, shared with the cache.
    pub base: Arc<LoadTable>,

    /// Choices offered by the filter panel.
    pub options: FilterOptions,

    /// Active filter selections.
    pub filters: FilterSpec,

    /// Rows passing the current filters (cached).
    pub view: LoadTable,

    pub metrics: KeyMetrics,

    /// Colour per equipment type.
    pub colors: CategoryColors,

    pub tab: AnalyticsTab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            cache: SourceCache::new(),
            source_path: None,
            base: Arc::new(LoadTable::empty()),
            options: FilterOptions::default(),
            filters: FilterSpec::all(),
            view: LoadTable::empty(),
            metrics: KeyMetrics::default(),
            colors: CategoryColors::default(),
            tab: AnalyticsTab::default(),
            status_message: None,
        }
    }

    /// Load (or re-use) the table for `path` and reset the view.
    pub fn load_source(&mut self, path: &Path) {
        let outcome = self.cache.load_path(path);
        self.source_path = Some(path.to_path_buf());
        self.status_message = outcome.problem.as_ref().map(|e| format!("Error: {e}"));

        if !outcome.rebuilt && Arc::ptr_eq(&outcome.table, &self.base) {
            return;
        }
        self.set_table(outcome.table);
    }

    /// Re-read the current source; unchanged content keeps the view as is.
    pub fn reload(&mut self) {
        if let Some(path) = self.source_path.clone() {
            self.load_source(&path);
        }
    }

    /// Ingest a newly built table, initialise filters and colours.
    fn set_table(&mut self, table: Arc<LoadTable>) {
        log::info!("Dashboard showing {table}");
        self.options = FilterOptions::from_table(&table);
        self.colors = CategoryColors::new(&self.options.equipment_types);
        self.base = table;
        self.filters = FilterSpec::all();
        self.refilter();
    }

    /// Replace the filter selections and recompute the view.
    pub fn set_filters(&mut self, filters: FilterSpec) {
        if filters != self.filters {
            self.filters = filters;
            self.refilter();
        }
    }

    pub fn reset_filters(&mut self) {
        self.set_filters(FilterSpec::all());
    }

    /// Recompute `view` and `metrics` after a filter change.
    fn refilter(&mut self) {
        self.view = filter(&self.base, &self.filters);
        self.metrics = KeyMetrics::compute(&self.view, &self.base);
    }
}
