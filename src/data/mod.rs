/// Data layer: core types, raw file loading, and collection building.
///
/// Architecture:
/// ```text
///  notes.csv        raw run .csv files
///     │                   │
///     ▼                   ▼
///  ┌───────┐         ┌────────┐
///  │ notes │         │ loader │  native columns → t_s / v / i
///  └───────┘         └────────┘
///        │              │
///        ▼              ▼
///     ┌──────────────────┐
///     │     builder      │  join + label strategy → Collection
///     └──────────────────┘
///              │
///              ▼
///     ┌──────────────────┐
///     │ model::Collection │  slice / inspect, persisted via store
///     └──────────────────┘
/// ```
pub mod builder;
pub mod loader;
pub mod model;
