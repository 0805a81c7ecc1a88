//! Minimal column table consumed by the chart helpers.
//!
//! Columns are either numeric (`f64`) or text. CSV input infers the kind per
//! column: numeric when every non-empty cell parses as a number.

use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("unknown column {0:?}")]
    UnknownColumn(String),
    #[error("column {0:?} is not numeric")]
    NotNumeric(String),
    #[error("column {name:?} has {found} rows, expected {expected}")]
    RaggedColumn {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("duplicate column name {0:?}")]
    DuplicateColumn(String),
    #[error("pivot index contains duplicate entries for ({index:?}, {column:?})")]
    DuplicatePivotEntry { index: String, column: String },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell rendered for display (category labels, legend entries).
    pub fn label_at(&self, row: usize) -> String {
        match self {
            ColumnData::Numeric(v) => format_number(v[row]),
            ColumnData::Text(v) => v[row].clone(),
        }
    }
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    pub fn text<S: Into<String>>(name: impl Into<String>, values: Vec<S>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values.into_iter().map(Into::into).collect()),
        }
    }
}

/// A column reference with an optional display rename.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selection {
    Column(String),
    Renamed { from: String, to: String },
}

impl Selection {
    pub fn renamed(from: impl Into<String>, to: impl Into<String>) -> Self {
        Selection::Renamed {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Source column name.
    pub fn column(&self) -> &str {
        match self {
            Selection::Column(c) => c,
            Selection::Renamed { from, .. } => from,
        }
    }

    /// Display name (the alias when renamed).
    pub fn label(&self) -> &str {
        match self {
            Selection::Column(c) => c,
            Selection::Renamed { to, .. } => to,
        }
    }
}

impl From<&str> for Selection {
    fn from(s: &str) -> Self {
        Selection::Column(s.to_string())
    }
}

impl From<String> for Selection {
    fn from(s: String) -> Self {
        Selection::Column(s)
    }
}

impl From<(&str, &str)> for Selection {
    fn from((from, to): (&str, &str)) -> Self {
        Selection::renamed(from, to)
    }
}

/// Parses `column` or `column=Alias`.
impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty column name".to_string());
        }
        match s.split_once('=') {
            Some((from, to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
                Ok(Selection::renamed(from.trim(), to.trim()))
            }
            Some(_) => Err(format!("invalid selection {s:?}, expected column=Alias")),
            None => Ok(Selection::Column(s.to_string())),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Column(c) => f.write_str(c),
            Selection::Renamed { from, to } => write!(f, "{from}={to}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, checking that all columns have the same row count and unique names.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        if let Some(first) = columns.first() {
            let expected = first.data.len();
            for c in &columns {
                if c.data.len() != expected {
                    return Err(TableError::RaggedColumn {
                        name: c.name.clone(),
                        expected,
                        found: c.data.len(),
                    });
                }
            }
        }
        for (i, c) in columns.iter().enumerate() {
            if columns[..i].iter().any(|o| o.name == c.name) {
                return Err(TableError::DuplicateColumn(c.name.clone()));
            }
        }
        Ok(Self { columns })
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
        Self::from_csv(rdr)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
        Self::from_csv(rdr)
    }

    fn from_csv<R: Read>(mut rdr: csv::Reader<R>) -> Result<Self, TableError> {
        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in rdr.records() {
            let record = record?;
            for (i, col) in cells.iter_mut().enumerate() {
                col.push(record.get(i).unwrap_or("").trim().to_string());
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, raw)| Column {
                name,
                data: infer_column(raw),
            })
            .collect();
        Self::new(columns)
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.data.len()).unwrap_or(0)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
    }

    pub fn numeric(&self, name: &str) -> Result<&[f64], TableError> {
        match &self.column(name)?.data {
            ColumnData::Numeric(v) => Ok(v),
            ColumnData::Text(_) => Err(TableError::NotNumeric(name.to_string())),
        }
    }

    /// Every cell of a column rendered as a label.
    pub fn labels(&self, name: &str) -> Result<Vec<String>, TableError> {
        let col = self.column(name)?;
        Ok((0..col.data.len()).map(|i| col.data.label_at(i)).collect())
    }

    /// Copy the selected columns into a new table, applying renames.
    pub fn select(&self, selections: &[Selection]) -> Result<Table, TableError> {
        let columns = selections
            .iter()
            .map(|s| {
                let src = self.column(s.column())?;
                Ok(Column {
                    name: s.label().to_string(),
                    data: src.data.clone(),
                })
            })
            .collect::<Result<Vec<_>, TableError>>()?;
        Table::new(columns)
    }

    /// Reshape long data to wide: one row per distinct `index` value and one numeric
    /// column per distinct `columns` value, both in first-appearance order.
    /// Combinations with no row are filled with `0.0`.
    pub fn pivot(&self, index: &str, columns: &str, values: &str) -> Result<Table, TableError> {
        let index_labels = self.labels(index)?;
        let column_labels = self.labels(columns)?;
        let vals = self.numeric(values)?;

        let mut row_order: Vec<String> = Vec::new();
        let mut row_pos: HashMap<String, usize> = HashMap::new();
        let mut col_order: Vec<String> = Vec::new();
        let mut col_pos: HashMap<String, usize> = HashMap::new();
        for (r, c) in index_labels.iter().zip(&column_labels) {
            if !row_pos.contains_key(r) {
                row_pos.insert(r.clone(), row_order.len());
                row_order.push(r.clone());
            }
            if !col_pos.contains_key(c) {
                col_pos.insert(c.clone(), col_order.len());
                col_order.push(c.clone());
            }
        }

        let mut grid: Vec<Vec<Option<f64>>> = vec![vec![None; row_order.len()]; col_order.len()];
        for ((r, c), v) in index_labels.iter().zip(&column_labels).zip(vals) {
            let cell = &mut grid[col_pos[c]][row_pos[r]];
            if cell.is_some() {
                return Err(TableError::DuplicatePivotEntry {
                    index: r.clone(),
                    column: c.clone(),
                });
            }
            *cell = Some(*v);
        }

        let index_data = match &self.column(index)?.data {
            ColumnData::Numeric(_) => ColumnData::Numeric(
                row_order
                    .iter()
                    .map(|s| s.parse::<f64>().unwrap_or(f64::NAN))
                    .collect(),
            ),
            ColumnData::Text(_) => ColumnData::Text(row_order),
        };
        let mut out = vec![Column {
            name: index.to_string(),
            data: index_data,
        }];
        for (name, cells) in col_order.into_iter().zip(grid) {
            out.push(Column::numeric(
                name,
                cells.into_iter().map(|c| c.unwrap_or(0.0)).collect(),
            ));
        }
        Table::new(out)
    }
}

fn infer_column(raw: Vec<String>) -> ColumnData {
    let parsed: Option<Vec<f64>> = raw
        .iter()
        .map(|s| {
            if s.is_empty() {
                Some(f64::NAN)
            } else {
                s.parse::<f64>().ok()
            }
        })
        .collect();
    match parsed {
        Some(nums) if raw.iter().any(|s| !s.is_empty()) => ColumnData::Numeric(nums),
        _ => ColumnData::Text(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales() -> Table {
        let csv = "quarter,region,revenue\nQ1,East,10\nQ1,West,5\nQ2,East,12\nQ3,West,7\n";
        Table::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn infers_column_kinds() {
        let t = sales();
        assert_eq!(t.n_rows(), 4);
        assert_eq!(t.numeric("revenue").unwrap(), &[10.0, 5.0, 12.0, 7.0]);
        assert!(matches!(t.numeric("region"), Err(TableError::NotNumeric(_))));
        assert!(matches!(t.column("nope"), Err(TableError::UnknownColumn(_))));
    }

    #[test]
    fn pivot_fills_missing_with_zero() {
        let wide = sales().pivot("quarter", "region", "revenue").unwrap();
        assert_eq!(wide.column_names(), vec!["quarter", "East", "West"]);
        assert_eq!(wide.labels("quarter").unwrap(), vec!["Q1", "Q2", "Q3"]);
        assert_eq!(wide.numeric("East").unwrap(), &[10.0, 12.0, 0.0]);
        assert_eq!(wide.numeric("West").unwrap(), &[5.0, 0.0, 7.0]);
    }

    #[test]
    fn pivot_rejects_duplicates() {
        let csv = "k,c,v\na,x,1\na,x,2\n";
        let t = Table::from_reader(csv.as_bytes()).unwrap();
        assert!(matches!(
            t.pivot("k", "c", "v"),
            Err(TableError::DuplicatePivotEntry { .. })
        ));
    }

    #[test]
    fn selection_parsing() {
        assert_eq!("a".parse::<Selection>().unwrap(), Selection::from("a"));
        let s: Selection = "rev=Revenue".parse().unwrap();
        assert_eq!(s.column(), "rev");
        assert_eq!(s.label(), "Revenue");
        assert!("=x".parse::<Selection>().is_err());
    }

    #[test]
    fn ragged_columns_are_rejected() {
        let err = Table::new(vec![
            Column::numeric("a", vec![1.0, 2.0]),
            Column::numeric("b", vec![1.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, TableError::RaggedColumn { found: 1, .. }));
    }
}
