use std::collections::BTreeSet;

use titanic_insights::data::passenger::Class;
use titanic_insights::summary::{FamilyFareSummary, SurnameTally, SurvivalSummary};
use titanic_insights::{Analysis, ChartSpec, DataError, DatasetSource};

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Demographics,
    Families,
    Surnames,
}

impl View {
    pub const ALL: [View; 3] = [View::Demographics, View::Families, View::Surnames];

    pub fn title(self) -> &'static str {
        match self {
            View::Demographics => "Survival by demographics",
            View::Families => "Fares by family size",
            View::Surnames => "Surnames",
        }
    }
}

// ---------------------------------------------------------------------------
// Computed summaries
// ---------------------------------------------------------------------------

/// Every summary and chart for the loaded dataset. A data-shape error stays
/// with the view that needed the missing data.
pub struct Summaries {
    pub survival: Result<SurvivalSummary, DataError>,
    pub demographic_chart: Result<ChartSpec, DataError>,
    pub families: Result<FamilyFareSummary, DataError>,
    pub family_chart: Result<ChartSpec, DataError>,
    pub surnames: Result<SurnameTally, DataError>,
}

impl Summaries {
    pub fn compute(analysis: &Analysis) -> Self {
        let survival = analysis.survival_demographics();
        let demographic_chart = survival
            .as_ref()
            .map(titanic_insights::visualize_demographic)
            .map_err(Clone::clone);
        let families = analysis.family_groups();
        let family_chart = families
            .as_ref()
            .map(titanic_insights::visualize_families)
            .map_err(Clone::clone);
        let surnames = analysis.last_names();

        let errors = [
            survival.as_ref().err(),
            families.as_ref().err(),
            surnames.as_ref().err(),
        ];
        for err in errors.into_iter().flatten() {
            log::error!("Summary failed: {err}");
        }

        Self {
            survival,
            demographic_chart,
            families,
            family_chart,
            surnames,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub analysis: Analysis,

    /// Where `analysis` was loaded from.
    pub source: DatasetSource,

    pub summaries: Summaries,

    pub view: View,

    /// Classes shown in charts and tables.
    pub visible_classes: BTreeSet<Class>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(analysis: Analysis, source: DatasetSource) -> Self {
        let summaries = Summaries::compute(&analysis);
        Self {
            analysis,
            source,
            summaries,
            view: View::Demographics,
            visible_classes: Class::ALL.into_iter().collect(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and recompute every summary.
    pub fn set_dataset(&mut self, analysis: Analysis, source: DatasetSource) {
        self.summaries = Summaries::compute(&analysis);
        self.analysis = analysis;
        self.source = source;
        self.status_message = None;
    }

    /// The chart descriptor behind the current view, if it has one.
    pub fn active_chart(&self) -> Option<&Result<ChartSpec, DataError>> {
        match self.view {
            View::Demographics => Some(&self.summaries.demographic_chart),
            View::Families => Some(&self.summaries.family_chart),
            View::Surnames => None,
        }
    }

    pub fn class_visible(&self, class: Class) -> bool {
        self.visible_classes.contains(&class)
    }

    /// Visibility of a facet or series labelled with a class number.
    pub fn label_visible(&self, label: &str) -> bool {
        label
            .parse::<i64>()
            .ok()
            .and_then(Class::from_number)
            .map_or(true, |class| self.class_visible(class))
    }

    pub fn toggle_class(&mut self, class: Class) {
        if !self.visible_classes.remove(&class) {
            self.visible_classes.insert(class);
        }
    }

    pub fn select_all(&mut self) {
        self.visible_classes = Class::ALL.into_iter().collect();
    }

    pub fn select_none(&mut self) {
        self.visible_classes.clear();
    }
}

#[cfg(test)]
mod tests {
    use titanic_insights::data::model::{Table, Value};

    use super::*;

    fn state() -> AppState {
        let table = Table::from_columns([("Pclass".to_string(), vec![Value::Integer(1)])]).unwrap();
        AppState::new(Analysis::new(table), DatasetSource::default())
    }

    #[test]
    fn shape_errors_stay_with_their_view() {
        let state = state();
        assert!(matches!(
            state.summaries.survival,
            Err(DataError::MissingColumn { .. })
        ));
        assert!(state.summaries.family_chart.is_err());
    }

    #[test]
    fn class_filter_toggles() {
        let mut state = state();
        assert!(state.label_visible("2"));
        state.toggle_class(Class::Second);
        assert!(!state.label_visible("2"));
        assert!(state.label_visible("female"));
        state.select_none();
        assert!(!state.class_visible(Class::First));
        state.select_all();
        assert!(state.class_visible(Class::Third));
    }
}
