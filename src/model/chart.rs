//! Chart specification and series normalization.
//!
//! Chart data arrives as an ordered category-to-value(s) mapping. Before a
//! chart part is written, the mapping is normalized into a shared category
//! axis plus one or more named series. The mapping's shape must be
//! consistent: every value scalar, or every value a sequence of one length.
//! Mixed shapes are rejected rather than truncated.

use crate::common::error::{Error, Result};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Kind of chart to plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Clustered column chart
    #[default]
    Bar,
    /// Line chart
    Line,
    /// Pie chart
    Pie,
}

/// A single value in chart data: one number, or one number per series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ChartValue {
    /// Single-series data point
    Scalar(f64),
    /// One data point per series
    Sequence(Vec<f64>),
}

/// Description of a chart on a slide.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ChartSpec {
    /// Chart kind
    #[serde(rename = "type", default)]
    pub kind: ChartKind,

    /// Chart title; also names the single pie series
    #[serde(default)]
    pub title: Option<String>,

    /// Ordered category-to-value(s) mapping
    #[serde(default, deserialize_with = "deserialize_ordered_data")]
    pub data: Vec<(String, ChartValue)>,

    /// Series names for bar/line charts, by position
    #[serde(default)]
    pub series_names: Vec<String>,
}

/// One named sequence of values plotted against the shared category axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Series name
    pub name: String,
    /// One value per category, in category order
    pub values: Vec<f64>,
}

/// A chart reduced to its plottable form.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedChart {
    /// Category labels, in input order
    pub categories: Vec<String>,
    /// Named series, each with one value per category
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Normalize the category mapping into categories plus named series.
    ///
    /// Pie charts collapse to exactly one series named by the chart title
    /// (default `"Series"`); `series_names` is ignored. Bar and line charts
    /// emit one series for scalar data (named `series_names[0]`, default
    /// `"Series 1"`) or one series per sequence position, with synthetic
    /// `"Series {i+1}"` names where `series_names` runs out.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidChartShape`] when the mapping mixes scalar and
    /// sequence values, or when per-category sequences disagree in length.
    pub fn normalize(&self) -> Result<NormalizedChart> {
        let categories: Vec<String> = self.data.iter().map(|(cat, _)| cat.clone()).collect();
        let scalars = self.validated_scalars()?;

        if self.kind == ChartKind::Pie {
            let values = match scalars {
                Shape::Scalars(values) => values,
                // A one-column matrix still collapses cleanly to a pie
                Shape::Rows(rows) if rows.iter().all(|r| r.len() == 1) => {
                    rows.into_iter().map(|r| r[0]).collect()
                },
                Shape::Rows(_) => {
                    return Err(Error::InvalidChartShape(
                        "pie charts take one value per category".to_string(),
                    ));
                },
            };
            let name = self
                .title
                .clone()
                .unwrap_or_else(|| "Series".to_string());
            return Ok(NormalizedChart {
                categories,
                series: vec![Series { name, values }],
            });
        }

        let series = match scalars {
            Shape::Scalars(values) => {
                let name = self
                    .series_names
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "Series 1".to_string());
                vec![Series { name, values }]
            },
            Shape::Rows(rows) => {
                let width = rows.first().map_or(0, Vec::len);
                (0..width)
                    .map(|i| Series {
                        name: self
                            .series_names
                            .get(i)
                            .cloned()
                            .unwrap_or_else(|| format!("Series {}", i + 1)),
                        values: rows.iter().map(|row| row[i]).collect(),
                    })
                    .collect()
            },
        };

        Ok(NormalizedChart { categories, series })
    }

    /// Validate that every value shares one shape and extract it.
    fn validated_scalars(&self) -> Result<Shape> {
        let mut values = self.data.iter().map(|(_, v)| v);
        let Some(first) = values.next() else {
            return Ok(Shape::Scalars(Vec::new()));
        };

        match first {
            ChartValue::Scalar(v) => {
                let mut out = vec![*v];
                for (cat, value) in self.data.iter().skip(1) {
                    match value {
                        ChartValue::Scalar(v) => out.push(*v),
                        ChartValue::Sequence(_) => {
                            return Err(Error::InvalidChartShape(format!(
                                "category '{cat}' is a sequence but earlier categories are scalar"
                            )));
                        },
                    }
                }
                Ok(Shape::Scalars(out))
            },
            ChartValue::Sequence(first_row) => {
                let width = first_row.len();
                let mut rows = vec![first_row.clone()];
                for (cat, value) in self.data.iter().skip(1) {
                    match value {
                        ChartValue::Sequence(row) if row.len() == width => {
                            rows.push(row.clone());
                        },
                        ChartValue::Sequence(row) => {
                            return Err(Error::InvalidChartShape(format!(
                                "category '{cat}' has {} values, expected {width}",
                                row.len()
                            )));
                        },
                        ChartValue::Scalar(_) => {
                            return Err(Error::InvalidChartShape(format!(
                                "category '{cat}' is scalar but earlier categories are sequences"
                            )));
                        },
                    }
                }
                Ok(Shape::Rows(rows))
            },
        }
    }
}

enum Shape {
    Scalars(Vec<f64>),
    Rows(Vec<Vec<f64>>),
}

/// Deserialize a JSON object into an order-preserving vector of pairs.
///
/// `serde_json`'s default map type does not keep insertion order, and
/// category order is meaningful for charts, so the mapping is consumed
/// entry by entry.
fn deserialize_ordered_data<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<(String, ChartValue)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedVisitor;

    impl<'de> Visitor<'de> for OrderedVisitor {
        type Value = Vec<(String, ChartValue)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of category names to numbers or number arrays")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, ChartValue>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(OrderedVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(kind: ChartKind, data: &[(&str, ChartValue)], names: &[&str]) -> ChartSpec {
        ChartSpec {
            kind,
            title: None,
            data: data
                .iter()
                .map(|(c, v)| (c.to_string(), v.clone()))
                .collect(),
            series_names: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_pie_collapses_to_one_series() {
        let chart = spec(
            ChartKind::Pie,
            &[
                ("A", ChartValue::Scalar(1.0)),
                ("B", ChartValue::Scalar(2.0)),
            ],
            &["ignored"],
        );
        let normalized = chart.normalize().unwrap();
        assert_eq!(normalized.categories, vec!["A", "B"]);
        assert_eq!(normalized.series.len(), 1);
        assert_eq!(normalized.series[0].name, "Series");
        assert_eq!(normalized.series[0].values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_pie_named_by_title() {
        let mut chart = spec(ChartKind::Pie, &[("A", ChartValue::Scalar(1.0))], &[]);
        chart.title = Some("Share".to_string());
        assert_eq!(chart.normalize().unwrap().series[0].name, "Share");
    }

    #[test]
    fn test_bar_multi_series_transposed() {
        let chart = spec(
            ChartKind::Bar,
            &[
                ("Q1", ChartValue::Sequence(vec![10.0, 20.0])),
                ("Q2", ChartValue::Sequence(vec![15.0, 25.0])),
            ],
            &["East", "West"],
        );
        let normalized = chart.normalize().unwrap();
        assert_eq!(normalized.categories, vec!["Q1", "Q2"]);
        assert_eq!(normalized.series.len(), 2);
        assert_eq!(normalized.series[0].name, "East");
        assert_eq!(normalized.series[0].values, vec![10.0, 15.0]);
        assert_eq!(normalized.series[1].name, "West");
        assert_eq!(normalized.series[1].values, vec![20.0, 25.0]);
    }

    #[test]
    fn test_scalar_bar_default_name() {
        let chart = spec(ChartKind::Bar, &[("A", ChartValue::Scalar(3.0))], &[]);
        let normalized = chart.normalize().unwrap();
        assert_eq!(normalized.series[0].name, "Series 1");
    }

    #[test]
    fn test_synthetic_series_names() {
        let chart = spec(
            ChartKind::Line,
            &[("A", ChartValue::Sequence(vec![1.0, 2.0, 3.0]))],
            &["Only"],
        );
        let names: Vec<_> = chart
            .normalize()
            .unwrap()
            .series
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Only", "Series 2", "Series 3"]);
    }

    #[test]
    fn test_mixed_shapes_rejected() {
        let chart = spec(
            ChartKind::Bar,
            &[
                ("A", ChartValue::Scalar(1.0)),
                ("B", ChartValue::Sequence(vec![2.0])),
            ],
            &[],
        );
        assert!(matches!(
            chart.normalize(),
            Err(Error::InvalidChartShape(_))
        ));
    }

    #[test]
    fn test_ragged_sequences_rejected() {
        let chart = spec(
            ChartKind::Bar,
            &[
                ("A", ChartValue::Sequence(vec![1.0, 2.0])),
                ("B", ChartValue::Sequence(vec![3.0])),
            ],
            &[],
        );
        assert!(matches!(
            chart.normalize(),
            Err(Error::InvalidChartShape(_))
        ));
    }

    #[test]
    fn test_data_order_preserved_through_serde() {
        let chart: ChartSpec = serde_json::from_str(
            r#"{"type": "bar", "data": {"Z": 1, "A": 2, "M": 3}}"#,
        )
        .unwrap();
        let normalized = chart.normalize().unwrap();
        assert_eq!(normalized.categories, vec!["Z", "A", "M"]);
    }
}
