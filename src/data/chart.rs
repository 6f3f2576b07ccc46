use super::model::{CellValue, Dataset};

/// Rows shown in the bar chart.
pub const BAR_ROW_LIMIT: usize = 10;
/// Rows shown in the line chart.
pub const LINE_ROW_LIMIT: usize = 30;

/// One x/y pair for a chart: identifier label and numeric value.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: CellValue,
    /// `None` when the cell is missing or not a number; kept so the
    /// renderer can decide how to draw the gap.
    pub value: Option<f64>,
}

/// The first [`BAR_ROW_LIMIT`] rows in original order (no ranking).
pub fn prepare_bar(dataset: &Dataset, identifier: &str, numeric: &str) -> Vec<ChartPoint> {
    first_rows(dataset, identifier, numeric, BAR_ROW_LIMIT)
}

/// The first [`LINE_ROW_LIMIT`] rows in original order.
pub fn prepare_line(dataset: &Dataset, identifier: &str, numeric: &str) -> Vec<ChartPoint> {
    first_rows(dataset, identifier, numeric, LINE_ROW_LIMIT)
}

fn first_rows(dataset: &Dataset, identifier: &str, numeric: &str, limit: usize) -> Vec<ChartPoint> {
    let id_idx = dataset.column_index(identifier);
    let num_idx = dataset.column_index(numeric);
    dataset
        .rows
        .iter()
        .take(limit)
        .map(|row| ChartPoint {
            label: id_idx.map(|i| row.get(i).clone()).unwrap_or(CellValue::Missing),
            value: num_idx.and_then(|i| row.get(i).as_f64()),
        })
        .collect()
}

/// Split a series into runs of consecutive defined values, as `[x, y]`
/// points where x is the row position. A missing value breaks the line.
pub fn line_segments(points: &[ChartPoint]) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for (i, p) in points.iter().enumerate() {
        match p.value {
            Some(v) => current.push([i as f64, v]),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(n: usize) -> Dataset {
        Dataset::new(
            vec!["CAS".into(), "LC50".into()],
            (0..n)
                .map(|i| {
                    vec![
                        CellValue::Text(format!("{i}-00-0")),
                        if i % 4 == 3 {
                            CellValue::Missing
                        } else {
                            CellValue::Number((n - i) as f64)
                        },
                    ]
                })
                .collect(),
        )
    }

    #[test]
    fn truncates_positionally() {
        let ds = dataset(50);
        let bar = prepare_bar(&ds, "CAS", "LC50");
        let line = prepare_line(&ds, "CAS", "LC50");
        assert_eq!(bar.len(), 10);
        assert_eq!(line.len(), 30);
        // Original order, not sorted by value.
        assert_eq!(bar[0].label, CellValue::Text("0-00-0".into()));
        assert_eq!(bar[0].value, Some(50.0));
        assert_eq!(line[29].label, CellValue::Text("29-00-0".into()));
    }

    #[test]
    fn short_datasets_are_returned_whole() {
        let ds = dataset(5);
        assert_eq!(prepare_bar(&ds, "CAS", "LC50").len(), 5);
        assert_eq!(prepare_line(&ds, "CAS", "LC50").len(), 5);
        assert!(prepare_bar(&dataset(0), "CAS", "LC50").is_empty());
    }

    #[test]
    fn missing_values_are_kept() {
        let bar = prepare_bar(&dataset(5), "CAS", "LC50");
        assert_eq!(bar[3].value, None);
        assert_eq!(bar[3].label, CellValue::Text("3-00-0".into()));
    }

    #[test]
    fn unknown_columns_degrade_to_missing() {
        let bar = prepare_bar(&dataset(2), "Nope", "Nada");
        assert_eq!(bar.len(), 2);
        assert!(bar.iter().all(|p| p.label.is_missing() && p.value.is_none()));
    }

    #[test]
    fn segments_break_at_gaps() {
        let line = prepare_line(&dataset(6), "CAS", "LC50");
        let segments = line_segments(&line);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], vec![[0.0, 6.0], [1.0, 5.0], [2.0, 4.0]]);
        assert_eq!(segments[1], vec![[4.0, 2.0], [5.0, 1.0]]);
    }
}
