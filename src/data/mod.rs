/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse records → LoadTable (memoized on content hash)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ LoadTable │  Vec<Arc<LoadRow>>, derived columns
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSpec predicates → LoadTable subset
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  metrics, rankings, chart series
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;

#[cfg(test)]
pub(crate) mod fixtures;
