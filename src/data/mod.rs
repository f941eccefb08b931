/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  .db / .sqlite / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<String> columns, Vec<Vec<CellValue>> rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ TableView │  sort / re-render (see crate::table)
///   └──────────┘
/// ```
pub mod loader;
pub mod model;
