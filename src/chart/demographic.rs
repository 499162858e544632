use palette::named;

use super::{Axis, ChartKind, ChartSpec, ColorMap, Detail, Outline, Point, Rgb, Series};
use crate::data::passenger::{AgeBracket, Class, Sex, AGE_GROUP, CLASS, SEX};
use crate::summary::{SurvivalRow, SurvivalSummary};

pub const DEMOGRAPHIC_TITLE: &str = "Survival Rate by Class, Sex, and Age Group";

/// First-class adult women are singled out on the chart.
fn is_highlighted(row: &SurvivalRow) -> bool {
    row.class == Class::First && row.sex == Sex::Female && row.age_group == AgeBracket::Adult
}

/// Grouped bars of survival rate per age bracket, coloured by sex, one panel
/// per class.
pub fn visualize_demographic(summary: &SurvivalSummary) -> ChartSpec {
    let colors = ColorMap::fixed(
        SEX,
        [
            (Sex::Male.label(), Rgb::from(named::STEELBLUE)),
            (Sex::Female.label(), Rgb::from(named::SALMON)),
        ],
    );

    let mut series = Vec::new();
    for class in Class::ALL {
        for sex in Sex::ALL {
            let points = summary
                .rows
                .iter()
                .filter(|r| r.class == class && r.sex == sex)
                .map(|r| Point {
                    x: r.age_group.index() as f64,
                    y: r.survival_rate,
                    size: None,
                    detail: vec![
                        Detail {
                            field: "n_passengers",
                            value: r.n_passengers as f64,
                        },
                        Detail {
                            field: "n_survivors",
                            value: r.n_survivors as f64,
                        },
                    ],
                    highlight: is_highlighted(r),
                })
                .collect();
            series.push(Series {
                name: sex.label().to_string(),
                facet: Some(class.to_string()),
                color: colors.color_for(sex.label()),
                points,
            });
        }
    }

    ChartSpec {
        kind: ChartKind::GroupedBar,
        title: DEMOGRAPHIC_TITLE.to_string(),
        x: Axis::categorical(AGE_GROUP, "Age group", AgeBracket::ALL.map(AgeBracket::label)),
        y: Axis::numeric("survival_rate", "Survival rate"),
        colors,
        facet_field: Some(CLASS.to_string()),
        size_field: None,
        outline: Some(Outline {
            color: Rgb::BLACK,
            width: 1.5,
        }),
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::survival::survival_rate;

    fn summary() -> SurvivalSummary {
        let rows = Class::ALL
            .into_iter()
            .flat_map(|c| Sex::ALL.into_iter().map(move |s| (c, s)))
            .flat_map(|(c, s)| AgeBracket::ALL.into_iter().map(move |b| (c, s, b)))
            .map(|(class, sex, age_group)| {
                let n_passengers = if class == Class::First { 4 } else { 0 };
                SurvivalRow {
                    class,
                    sex,
                    age_group,
                    n_passengers,
                    n_survivors: n_passengers / 2,
                    survival_rate: survival_rate(n_passengers / 2, n_passengers),
                }
            })
            .collect();
        SurvivalSummary { rows, excluded: 0 }
    }

    #[test]
    fn one_series_per_class_and_sex() {
        let chart = visualize_demographic(&summary());
        assert_eq!(chart.kind, ChartKind::GroupedBar);
        assert_eq!(chart.series.len(), 6);
        assert_eq!(chart.facets(), vec![Some("1"), Some("2"), Some("3")]);
        assert!(chart.series.iter().all(|s| s.points.len() == 4));
    }

    #[test]
    fn bars_follow_bracket_order() {
        let chart = visualize_demographic(&summary());
        let first = &chart.series[0];
        assert_eq!(first.name, "female");
        assert_eq!(chart.x.category_at(first.points[2].x), Some("Adult"));
        assert_eq!(first.points[2].y, 0.5);
        assert_eq!(first.points[2].detail[0].value, 4.0);
    }

    #[test]
    fn sex_colours_are_fixed() {
        let chart = visualize_demographic(&summary());
        assert_eq!(chart.colors.color_for("male"), Rgb(70, 130, 180));
        assert_eq!(chart.colors.color_for("female"), Rgb(250, 128, 114));
    }

    #[test]
    fn only_first_class_adult_women_highlighted() {
        let chart = visualize_demographic(&summary());
        let highlighted: Vec<_> = chart
            .series
            .iter()
            .flat_map(|s| s.points.iter().filter(|p| p.highlight).map(move |p| (s, p)))
            .collect();
        assert_eq!(highlighted.len(), 1);
        let (series, point) = highlighted[0];
        assert_eq!(series.facet.as_deref(), Some("1"));
        assert_eq!(series.name, "female");
        assert_eq!(point.x, AgeBracket::Adult.index() as f64);
    }
}
