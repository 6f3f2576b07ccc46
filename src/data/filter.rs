use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Equality filter on a single column
// ---------------------------------------------------------------------------

/// Return indices of rows whose `column` cell equals `value`, in row order.
///
/// Equality is exact and type-sensitive. Missing cells never match, and an
/// unknown column or a missing target matches nothing.
pub fn matching_indices(dataset: &Dataset, column: &str, value: &CellValue) -> Vec<usize> {
    if value.is_missing() {
        return Vec::new();
    }
    let Some(col_idx) = dataset.column_index(column) else {
        return Vec::new();
    };
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.get(col_idx) == value)
        .map(|(i, _)| i)
        .collect()
}

/// The subset of `dataset` whose `column` equals `value`, as a new dataset
/// with the same header. Never fails; no match gives an empty dataset.
pub fn filter(dataset: &Dataset, column: &str, value: &CellValue) -> Dataset {
    let rows = matching_indices(dataset, column, value)
        .into_iter()
        .map(|i| dataset.rows[i].clone())
        .collect();
    Dataset {
        columns: dataset.columns.clone(),
        rows,
    }
}

/// Narrow a value list for the selector by a case-insensitive substring.
pub fn search_values<'a>(values: &'a [CellValue], query: &str) -> Vec<&'a CellValue> {
    let query = query.trim().to_lowercase();
    values
        .iter()
        .filter(|v| query.is_empty() || v.to_string().to_lowercase().contains(&query))
        .collect()
}
