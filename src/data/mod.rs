/// Data layer: sources, ingestion, caching, and queries.
///
/// Architecture:
/// ```text
///  names.zip  (HTTP / local file / memory)
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  fetch archive bytes
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  yobYYYY.txt entries → EntryTable → Dataset (+ total_births, prop)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  single slot, filled once per session
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  overview / name trend / sex ratio
///   └──────────┘
/// ```

pub mod cache;
pub mod loader;
pub mod model;
pub mod query;
pub mod source;
