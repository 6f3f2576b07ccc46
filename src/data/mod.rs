/// Data layer: core types, loading, statistics, filtering, charts, export.
///
/// Architecture:
/// ```text
///  URL / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → Dataset (or LoadError)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  columns + rows of CellValue, immutable
///   └──────────┘
///     │      │        │
///     ▼      ▼        ▼
///  summary  filter   chart      describe() / equality subset / first-N series
///            │
///            ▼
///         export                subset → CSV bytes
/// ```

pub mod chart;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
