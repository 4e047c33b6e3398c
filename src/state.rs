//! Application State Module
//! Explicit dashboard state and the handler that applies one action to it.

use std::sync::Arc;

use crate::auth::check_password;
use crate::config::Layout;
use crate::data::{DataProcessor, Table};
use crate::report::ColumnReport;
use crate::stats::{ColumnSummary, PatientOverview, StatsCalculator};

// ---------------------------------------------------------------------------
// Tabs and actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    RawData,
    Charts,
    /// Long layout only.
    Overview,
}

/// One user interaction, emitted by a single widget.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SubmitPassword(String),
    SelectTab(Tab),
    Search(String),
    SelectColumn(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
#[derive(Debug, Clone)]
pub struct AppState {
    pub layout: Layout,
    /// Shared secret; `None` disables the password gate.
    secret: Option<String>,
    pub authenticated: bool,
    pub login_error: Option<String>,

    /// Loaded once at startup and never modified.
    pub table: Arc<Table>,
    pub preview_rows: usize,

    pub active_tab: Tab,
    pub search_term: String,
    /// Rows matching `search_term`; `None` while the term is empty.
    pub search_results: Option<Table>,
    pub search_error: Option<String>,

    /// Choices offered by the column selector.
    pub column_options: Vec<String>,
    pub selected: Option<String>,
    pub report: Option<ColumnReport>,

    pub overview: Option<PatientOverview>,
    pub column_summaries: Vec<ColumnSummary>,

    /// Selection or export error shown under the column selector.
    pub error: Option<String>,
}

impl AppState {
    pub fn new(table: Table, layout: Layout, secret: Option<String>, preview_rows: usize) -> Self {
        let mut state = Self {
            layout,
            authenticated: secret.is_none(),
            secret,
            login_error: None,
            table: Arc::new(table),
            preview_rows,
            active_tab: match layout {
                Layout::Wide => Tab::RawData,
                Layout::Long => Tab::Overview,
            },
            search_term: String::new(),
            search_results: None,
            search_error: None,
            column_options: Vec::new(),
            selected: None,
            report: None,
            overview: None,
            column_summaries: Vec::new(),
            error: None,
        };

        state.column_options = match layout {
            Layout::Wide => state.table.column_names(),
            Layout::Long => DataProcessor::long_format_options(&state.table).unwrap_or_else(|e| {
                log::warn!("Falling back to plain columns: {}", e);
                state.table.column_names()
            }),
        };

        if layout == Layout::Long {
            state.overview = match StatsCalculator::patient_overview(&state.table) {
                Ok(overview) => Some(overview),
                Err(e) => {
                    log::warn!("Patient overview unavailable: {}", e);
                    None
                }
            };
        }

        state.column_summaries = StatsCalculator::summarize_all(&state.table).unwrap_or_else(|e| {
            log::warn!("Column summaries unavailable: {}", e);
            Vec::new()
        });

        if let Some(first) = state.column_options.first().cloned() {
            state.select_column(first);
        }
        state
    }

    /// Whether the Overview tab applies to this layout.
    pub fn has_overview(&self) -> bool {
        self.layout == Layout::Long
    }

    /// Produce the state that follows `action`.
    pub fn apply(&self, action: Action) -> AppState {
        log::debug!("Handling {:?}", action);
        let mut next = self.clone();

        if !next.authenticated {
            match action {
                Action::SubmitPassword(candidate) => next.submit_password(&candidate),
                other => log::debug!("Ignoring {:?} before login", other),
            }
            return next;
        }

        match action {
            Action::SubmitPassword(_) => {}
            Action::SelectTab(tab) => {
                if tab != Tab::Overview || next.has_overview() {
                    next.active_tab = tab;
                }
            }
            Action::Search(term) => next.search(term),
            Action::SelectColumn(column) => next.select_column(column),
        }
        next
    }

    fn submit_password(&mut self, candidate: &str) {
        let accepted = self
            .secret
            .as_deref()
            .map_or(true, |expected| check_password(candidate, expected));

        if accepted {
            self.authenticated = true;
            self.login_error = None;
        } else {
            log::warn!("Rejected dashboard password");
            self.login_error = Some("Incorrect password".to_string());
        }
    }

    fn search(&mut self, term: String) {
        self.search_error = None;
        self.search_results = if term.is_empty() {
            None
        } else {
            match DataProcessor::search_filter(&self.table, &term) {
                Ok(rows) => Some(rows),
                Err(e) => {
                    log::warn!("Search for {:?} failed: {}", term, e);
                    self.search_error = Some(format!("Search failed: {}", e));
                    None
                }
            }
        };
        self.search_term = term;
    }

    fn select_column(&mut self, column: String) {
        match ColumnReport::build(&self.table, self.layout, &column) {
            Ok(report) => {
                self.report = Some(report);
                self.error = None;
            }
            Err(e) => {
                log::warn!("Cannot analyze {}: {}", column, e);
                self.report = None;
                self.error = Some(format!("Error: {}", e));
            }
        }
        self.selected = Some(column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;
    use polars::prelude::*;

    fn wide() -> Table {
        df!(
            "age" => &[30i64, 45, 30],
            "gender" => &["Male", "Female", "Male"]
        )
        .unwrap()
        .into()
    }

    #[test]
    fn test_open_dashboard_selects_first_column() {
        let state = AppState::new(wide(), Layout::Wide, None, 5);
        assert!(state.authenticated);
        assert_eq!(state.active_tab, Tab::RawData);
        assert_eq!(state.column_options, vec!["age", "gender"]);
        assert_eq!(state.selected.as_deref(), Some("age"));
        assert_eq!(state.report.as_ref().unwrap().chart.kind(), ChartKind::Histogram);
        assert_eq!(state.column_summaries.len(), 2);
        assert!(state.overview.is_none());
    }

    #[test]
    fn test_password_gate() {
        let state = AppState::new(wide(), Layout::Wide, Some("secret".to_string()), 5);
        assert!(!state.authenticated);

        let ignored = state.apply(Action::SelectColumn("gender".to_string()));
        assert_eq!(ignored.selected.as_deref(), Some("age"));

        let rejected = state.apply(Action::SubmitPassword("wrong".to_string()));
        assert!(!rejected.authenticated);
        assert!(rejected.login_error.is_some());

        let accepted = rejected.apply(Action::SubmitPassword("secret".to_string()));
        assert!(accepted.authenticated);
        assert!(accepted.login_error.is_none());
        // the previous state is untouched
        assert!(!rejected.authenticated);
    }

    #[test]
    fn test_search_and_clear() {
        let state = AppState::new(wide(), Layout::Wide, None, 5);
        let searched = state.apply(Action::Search("female".to_string()));
        assert_eq!(searched.search_results.as_ref().unwrap().height(), 1);

        let cleared = searched.apply(Action::Search(String::new()));
        assert!(cleared.search_results.is_none());
        assert_eq!(cleared.table.height(), 3);
    }

    #[test]
    fn test_select_column() {
        let state = AppState::new(wide(), Layout::Wide, None, 5);
        let next = state.apply(Action::SelectColumn("gender".to_string()));
        assert_eq!(next.report.as_ref().unwrap().chart.kind(), ChartKind::Bar);

        let missing = next.apply(Action::SelectColumn("height".to_string()));
        assert!(missing.report.is_none());
        assert!(missing.error.is_some());
    }

    #[test]
    fn test_search_and_selection_errors_are_independent() {
        let state = AppState::new(wide(), Layout::Wide, None, 5);
        let missing = state.apply(Action::SelectColumn("height".to_string()));
        let searched = missing.apply(Action::Search("male".to_string()));
        assert_eq!(searched.search_results.as_ref().unwrap().height(), 3);
        assert!(searched.search_error.is_none());
        assert_eq!(searched.error, missing.error);

        let mut stale = state.clone();
        stale.search_error = Some("Search failed: earlier".to_string());
        let searched = stale.apply(Action::Search("female".to_string()));
        assert!(searched.search_error.is_none());
        let selected = stale.apply(Action::SelectColumn("gender".to_string()));
        assert!(selected.error.is_none());
        assert_eq!(selected.search_error, stale.search_error);
    }

    #[test]
    fn test_overview_tab_only_for_long_layout() {
        let state = AppState::new(wide(), Layout::Wide, None, 5);
        assert_eq!(state.apply(Action::SelectTab(Tab::Overview)).active_tab, Tab::RawData);
        assert_eq!(state.apply(Action::SelectTab(Tab::Charts)).active_tab, Tab::Charts);
    }
}
