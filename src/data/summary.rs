use super::model::Dataset;

// ---------------------------------------------------------------------------
// Descriptive statistics per numeric column
// ---------------------------------------------------------------------------

/// `describe()`-style statistics for one numeric column.
///
/// Every derived statistic is `None` when it is undefined: all of them for a
/// column with no values, and `std` for a column with a single value.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    /// Number of non-missing values.
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (ddof = 1).
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Statistics for every numeric column, in dataset column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStatistics {
    pub columns: Vec<ColumnSummary>,
}

impl SummaryStatistics {
    pub fn get(&self, column: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.column == column)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Row labels for the statistics table, in display order.
pub const STAT_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

impl ColumnSummary {
    /// Values in [`STAT_LABELS`] order.
    pub fn values(&self) -> [Option<f64>; 8] {
        [
            Some(self.count as f64),
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Compute statistics over every numeric column, ignoring missing cells.
pub fn summarize(dataset: &Dataset) -> SummaryStatistics {
    let columns = dataset
        .numeric_columns()
        .into_iter()
        .map(|column| {
            let values: Vec<f64> = dataset
                .column_index(&column)
                .map(|idx| dataset.rows.iter().filter_map(|r| r.get(idx).as_f64()).collect())
                .unwrap_or_default();
            summarize_values(column, values)
        })
        .collect();
    SummaryStatistics { columns }
}

fn summarize_values(column: String, mut values: Vec<f64>) -> ColumnSummary {
    let count = values.len();
    if count == 0 {
        return ColumnSummary {
            column,
            count,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
        };
    }

    values.sort_by(|a, b| a.total_cmp(b));
    let n = count as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = (count > 1).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1.0)).sqrt()
    });

    ColumnSummary {
        column,
        count,
        mean: Some(mean),
        std,
        min: values.first().copied(),
        q25: percentile(&values, 0.25),
        median: percentile(&values, 0.50),
        q75: percentile(&values, 0.75),
        max: values.last().copied(),
    }
}

/// Linear-interpolation percentile over an ascending slice.
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    fn numeric_dataset(values: &[Option<f64>]) -> Dataset {
        Dataset::new(
            vec!["CAS".into(), "LC50".into()],
            values
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    vec![
                        CellValue::Text(format!("cas-{i}")),
                        v.map(CellValue::Number).unwrap_or(CellValue::Missing),
                    ]
                })
                .collect(),
        )
    }

    #[test]
    fn describes_values_ignoring_missing() {
        let ds = numeric_dataset(&[Some(1.0), Some(2.0), Some(3.0), Some(4.0), None]);
        let stats = summarize(&ds);
        assert_eq!(stats.columns.len(), 1);

        let s = stats.get("LC50").unwrap();
        assert_eq!(s.count, 4);
        assert!(approx(s.mean, 2.5));
        assert!(approx(s.std, 1.2909944487358056));
        assert!(approx(s.min, 1.0));
        assert!(approx(s.q25, 1.75));
        assert!(approx(s.median, 2.5));
        assert!(approx(s.q75, 3.25));
        assert!(approx(s.max, 4.0));
    }

    #[test]
    fn all_missing_column_is_undefined_not_zero() {
        let ds = numeric_dataset(&[None, None]);
        let s = summarize(&ds).get("LC50").cloned().unwrap();
        assert_eq!(s.count, 0);
        assert!(s.values()[1..].iter().all(Option::is_none));
    }

    #[test]
    fn single_value_has_no_std() {
        let ds = numeric_dataset(&[Some(7.0)]);
        let s = summarize(&ds).get("LC50").cloned().unwrap();
        assert_eq!(s.count, 1);
        assert!(approx(s.mean, 7.0));
        assert_eq!(s.std, None);
        assert!(approx(s.q75, 7.0));
    }

    #[test]
    fn text_columns_are_not_summarized() {
        let ds = numeric_dataset(&[Some(1.0)]);
        assert!(summarize(&ds).get("CAS").is_none());
    }

    #[test]
    fn percentile_interpolates_between_ranks() {
        let sorted = [10.0, 20.0, 30.0];
        assert!(approx(percentile(&sorted, 0.0), 10.0));
        assert!(approx(percentile(&sorted, 0.25), 15.0));
        assert!(approx(percentile(&sorted, 1.0), 30.0));
        assert_eq!(percentile(&[], 0.5), None);
    }
}
