//! Renderer-independent chart descriptors.
//!
//! A [`ChartSpec`] says which summary field drives which visual channel
//! (x, y, colour, facet, size) and carries the resolved series. The dashboard
//! draws them with `egui_plot`; they also serialise to JSON as they are.

pub mod color;
mod demographic;
mod family;

use serde::Serialize;

pub use color::{ColorMap, Rgb};
pub use demographic::{visualize_demographic, DEMOGRAPHIC_TITLE};
pub use family::{visualize_families, FAMILY_TITLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Bars side by side per x category, one bar per colour key value.
    GroupedBar,
    Scatter,
}

/// Field bound to an axis. Categorical axes list their categories in order;
/// point `x` values are then indices into that list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub field: String,
    pub label: String,
    pub categories: Option<Vec<String>>,
}

impl Axis {
    pub fn numeric(field: &str, label: &str) -> Self {
        Self {
            field: field.to_string(),
            label: label.to_string(),
            categories: None,
        }
    }

    pub fn categorical<I, S>(field: &str, label: &str, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.to_string(),
            label: label.to_string(),
            categories: Some(categories.into_iter().map(Into::into).collect()),
        }
    }

    /// Category label for an x position, if the axis is categorical.
    pub fn category_at(&self, position: f64) -> Option<&str> {
        if position < 0.0 || position.fract() != 0.0 {
            return None;
        }
        self.categories
            .as_ref()?
            .get(position as usize)
            .map(String::as_str)
    }
}

/// Stroke drawn around every mark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outline {
    pub color: Rgb,
    pub width: f32,
}

/// Supplementary value shown with a mark (hover data).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detail {
    pub field: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Value of the size key, when the chart has one.
    pub size: Option<f64>,
    pub detail: Vec<Detail>,
    pub highlight: bool,
}

/// Marks sharing one colour key value within one facet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub facet: Option<String>,
    pub color: Rgb,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x: Axis,
    pub y: Axis,
    pub colors: ColorMap,
    pub facet_field: Option<String>,
    pub size_field: Option<String>,
    pub outline: Option<Outline>,
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Facet values in first-appearance order; a single `None` when the chart
    /// is not faceted.
    pub fn facets(&self) -> Vec<Option<&str>> {
        let mut facets: Vec<Option<&str>> = Vec::new();
        for series in &self.series {
            let facet = series.facet.as_deref();
            if !facets.contains(&facet) {
                facets.push(facet);
            }
        }
        facets
    }

    pub fn series_in<'a>(
        &'a self,
        facet: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Series> + 'a {
        self.series
            .iter()
            .filter(move |s| s.facet.as_deref() == facet)
    }

    /// Largest size-key value across all points.
    pub fn max_size(&self) -> Option<f64> {
        self.series
            .iter()
            .flat_map(|s| &s.points)
            .filter_map(|p| p.size)
            .reduce(f64::max)
    }
}
