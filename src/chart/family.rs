use super::{Axis, ChartKind, ChartSpec, ColorMap, Detail, Point, Series};
use crate::data::passenger::{Class, CLASS, FAMILY_SIZE};
use crate::summary::FamilyFareSummary;

pub const FAMILY_TITLE: &str = "Average Fare by Family Size and Class";

/// Mean fare against family size, one colour per class, points sized by
/// passenger count.
pub fn visualize_families(summary: &FamilyFareSummary) -> ChartSpec {
    let colors = ColorMap::generated(CLASS, Class::ALL.map(|c| c.to_string()));

    let series = Class::ALL
        .into_iter()
        .filter_map(|class| {
            let points: Vec<Point> = summary
                .rows
                .iter()
                .filter(|r| r.class == class)
                .map(|r| Point {
                    x: r.family_size as f64,
                    y: r.avg_fare,
                    size: Some(r.n_passengers as f64),
                    detail: vec![
                        Detail {
                            field: "min_fare",
                            value: r.min_fare,
                        },
                        Detail {
                            field: "max_fare",
                            value: r.max_fare,
                        },
                    ],
                    highlight: false,
                })
                .collect();
            let name = class.to_string();
            (!points.is_empty()).then(|| Series {
                color: colors.color_for(&name),
                name,
                facet: None,
                points,
            })
        })
        .collect();

    ChartSpec {
        kind: ChartKind::Scatter,
        title: FAMILY_TITLE.to_string(),
        x: Axis::numeric(FAMILY_SIZE, "Family size"),
        y: Axis::numeric("avg_fare", "Average fare"),
        colors,
        facet_field: None,
        size_field: Some("n_passengers".to_string()),
        outline: None,
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::FamilyFareRow;

    fn row(class: Class, family_size: i64, n_passengers: usize, avg_fare: f64) -> FamilyFareRow {
        FamilyFareRow {
            family_size,
            class,
            n_passengers,
            avg_fare,
            min_fare: avg_fare / 2.0,
            max_fare: avg_fare * 2.0,
        }
    }

    #[test]
    fn series_per_observed_class() {
        let summary = FamilyFareSummary {
            rows: vec![
                row(Class::First, 1, 10, 80.0),
                row(Class::First, 2, 4, 120.0),
                row(Class::Third, 1, 40, 9.0),
            ],
            excluded: 0,
        };
        let chart = visualize_families(&summary);
        assert_eq!(chart.kind, ChartKind::Scatter);
        let names: Vec<_> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["1", "3"]);
        assert_eq!(chart.facets(), vec![None::<&str>]);
        assert_eq!(chart.max_size(), Some(40.0));
    }

    #[test]
    fn points_carry_size_and_fare_range() {
        let summary = FamilyFareSummary {
            rows: vec![row(Class::Second, 3, 7, 20.0)],
            excluded: 0,
        };
        let chart = visualize_families(&summary);
        let point = &chart.series[0].points[0];
        assert_eq!((point.x, point.y, point.size), (3.0, 20.0, Some(7.0)));
        assert_eq!(point.detail[0].value, 10.0);
        assert_eq!(point.detail[1].value, 40.0);
        assert_eq!(chart.series[0].color, chart.colors.color_for("2"));
    }
}
