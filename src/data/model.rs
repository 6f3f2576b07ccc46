use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the hazard table
// ---------------------------------------------------------------------------

/// Markers a dataframe reader treats as "no data" when reading CSV text.
const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A dynamically-typed cell value.
///
/// Equality is type-sensitive: `Text("5")` never equals `Number(5.0)`.
/// `Missing` compares equal to itself (so rows can be compared value-for-value)
/// but the filter engine never treats it as a match.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

// `Number` never holds NaN (see `infer`), so equality is total.
impl Eq for CellValue {}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            // Normalise -0.0 so it hashes like 0.0, which it equals.
            CellValue::Number(v) => (v + 0.0).to_bits().hash(state),
            CellValue::Missing => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Missing => write!(f, "<missing>"),
        }
    }
}

impl CellValue {
    /// Infer the type of a raw CSV field.
    ///
    /// Empty fields and NA markers become `Missing`, anything `f64` can parse
    /// becomes `Number`, the rest stays `Text`.
    pub fn infer(raw: &str) -> Self {
        if raw.is_empty() || NA_MARKERS.contains(&raw) {
            return CellValue::Missing;
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_nan() => CellValue::Missing,
            Ok(v) => CellValue::Number(v),
            Err(_) => CellValue::Text(raw.to_string()),
        }
    }

    /// Numeric view of the cell, `None` for text and missing cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Text written back out to CSV. Missing cells are empty fields.
    pub fn to_field(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(v) => v.to_string(),
            CellValue::Missing => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Row – one record of the table
// ---------------------------------------------------------------------------

/// One row, positionally aligned with [`Dataset::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<CellValue>,
}

impl Row {
    pub fn get(&self, idx: usize) -> &CellValue {
        self.values.get(idx).unwrap_or(&CellValue::Missing)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table. Immutable once built; derived views are new datasets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Unique column names in header order.
    pub columns: Vec<String>,
    /// All rows, each exactly `columns.len()` cells wide.
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset, normalising the header and squaring every row to it.
    ///
    /// Blank names become `Unnamed: <i>` and repeated names get `.1`, `.2`
    /// suffixes. Short rows are padded with `Missing`, long rows truncated.
    pub fn new(header: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let columns = normalize_header(header);
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut values| {
                values.resize(width, CellValue::Missing);
                Row { values }
            })
            .collect();
        Dataset { columns, rows }
    }

    /// Empty dataset sharing this dataset's header.
    pub fn empty_like(&self) -> Self {
        Dataset {
            columns: self.columns.clone(),
            rows: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Columns whose cells are all numbers or missing, in header order.
    /// A dataset without rows has no numeric columns.
    pub fn numeric_columns(&self) -> Vec<String> {
        if self.rows.is_empty() {
            return Vec::new();
        }
        self.columns
            .iter()
            .enumerate()
            .filter(|(idx, _)| {
                self.rows
                    .iter()
                    .all(|r| matches!(r.get(*idx), CellValue::Number(_) | CellValue::Missing))
            })
            .map(|(_, name)| name.clone())
            .collect()
    }

    /// Non-missing values of `column` in order of first appearance.
    pub fn distinct_values(&self, column: &str) -> Vec<CellValue> {
        let Some(idx) = self.column_index(column) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|r| r.get(idx))
            .filter(|v| !v.is_missing())
            .filter(|v| seen.insert(*v))
            .cloned()
            .collect()
    }
}

fn normalize_header(header: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut columns = Vec::with_capacity(header.len());
    for (i, name) in header.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {i}")
        } else {
            name
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        while used.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        used.insert(candidate.clone());
        columns.push(candidate);
    }
    columns
}
