//! Stacked bar series: layer collection and cumulative baselines.

use crate::table::{Selection, Table, TableError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StackError {
    #[error("no series to stack")]
    Empty,
    #[error("all stacked series must have equal length: series {index} has {found} values, expected {expected}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("series index {index} out of range for a stack of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Baseline ("bottom") for series `index`: the element-wise sum of series `0..index`.
///
/// `index == 0` yields zeros; `index == series.len()` yields the stack totals.
/// Every series is length-checked up front, not just the prefix being summed.
pub fn sum_series<S: AsRef<[f64]>>(index: usize, series: &[S]) -> Result<Vec<f64>, StackError> {
    let expected = common_len(series)?;
    if index > series.len() {
        return Err(StackError::IndexOutOfRange {
            index,
            len: series.len(),
        });
    }
    let mut bottom = vec![0.0; expected];
    for s in &series[..index] {
        for (acc, v) in bottom.iter_mut().zip(s.as_ref()) {
            *acc += v;
        }
    }
    Ok(bottom)
}

/// `(bottom, top)` per series, in stacking order.
pub fn stack_bounds<S: AsRef<[f64]>>(series: &[S]) -> Result<Vec<(Vec<f64>, Vec<f64>)>, StackError> {
    let len = common_len(series)?;
    let mut bottom = vec![0.0; len];
    let mut out = Vec::with_capacity(series.len());
    for s in series {
        let top: Vec<f64> = bottom.iter().zip(s.as_ref()).map(|(b, v)| b + v).collect();
        out.push((bottom, top.clone()));
        bottom = top;
    }
    Ok(out)
}

fn common_len<S: AsRef<[f64]>>(series: &[S]) -> Result<usize, StackError> {
    let expected = series.first().ok_or(StackError::Empty)?.as_ref().len();
    for (index, s) in series.iter().enumerate() {
        let found = s.as_ref().len();
        if found != expected {
            return Err(StackError::LengthMismatch {
                index,
                expected,
                found,
            });
        }
    }
    Ok(expected)
}

/// One layer of a stacked bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    pub name: String,
    pub values: Vec<f64>,
}

impl AsRef<[f64]> for NamedSeries {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Base-axis categories plus the layers stacked on them, bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedSeries {
    pub base_label: String,
    pub base: Vec<String>,
    pub series: Vec<NamedSeries>,
}

impl StackedSeries {
    /// Checks that every layer has one value per base category.
    pub fn new(
        base_label: impl Into<String>,
        base: Vec<String>,
        series: Vec<NamedSeries>,
    ) -> Result<Self, StackError> {
        if series.is_empty() {
            return Err(StackError::Empty);
        }
        for (index, s) in series.iter().enumerate() {
            if s.values.len() != base.len() {
                return Err(StackError::LengthMismatch {
                    index,
                    expected: base.len(),
                    found: s.values.len(),
                });
            }
        }
        Ok(Self {
            base_label: base_label.into(),
            base,
            series,
        })
    }

    pub fn bottom(&self, index: usize) -> Result<Vec<f64>, StackError> {
        sum_series(index, &self.series)
    }

    pub fn totals(&self) -> Vec<f64> {
        // lengths were validated on construction
        sum_series(self.series.len(), &self.series).unwrap_or_default()
    }
}

/// Where the stacked layers come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesSource {
    /// One numeric column per layer.
    Columns(Vec<Selection>),
    /// Long data: pivot `values` by the categories in `columns`, then pick the
    /// listed categories (as layers) in order.
    Pivot {
        columns: String,
        values: String,
        layers: Vec<Selection>,
    },
}

#[derive(Debug, Error)]
pub enum StackedSeriesError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Stack(#[from] StackError),
}

/// Build a [`StackedSeries`] from a table.
///
/// `base` picks the categorical base-axis column; renames apply to the axis
/// title and legend labels.
pub fn stacked_series(
    table: &Table,
    base: &Selection,
    source: &SeriesSource,
) -> Result<StackedSeries, StackedSeriesError> {
    let pivoted;
    let (table, layers) = match source {
        SeriesSource::Columns(layers) => (table, layers),
        SeriesSource::Pivot {
            columns,
            values,
            layers,
        } => {
            pivoted = table.pivot(base.column(), columns, values)?;
            (&pivoted, layers)
        }
    };

    let base_values = table.labels(base.column())?;
    let series = layers
        .iter()
        .map(|sel| {
            Ok(NamedSeries {
                name: sel.label().to_string(),
                values: table.numeric(sel.column())?.to_vec(),
            })
        })
        .collect::<Result<Vec<_>, TableError>>()?;
    Ok(StackedSeries::new(base.label(), base_values, series)?)
}
