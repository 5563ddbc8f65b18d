//! Data layer: table model, loading, and numeric coercion.
//!
//! Architecture:
//! ```text
//!   .csv bytes / file
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse CSV → Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Table    │  header + rows of CellValue
//!   └──────────┘
//!        │  one column
//!        ▼
//!   ┌──────────┐
//!   │  coerce   │  strip separators, parse, drop gaps → Vec<f64>
//!   └──────────┘
//! ```

pub mod coerce;
pub mod loader;
pub mod model;
pub mod sample;
