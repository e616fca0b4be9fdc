//! # drought-series
//!
//! The single time series container used across the drought pipeline, plus
//! the operations that reshape a raw series before standardization.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["&[f64] (NaN = missing)"] -->|"TimeSeries::from_values()"| B["TimeSeries"]
//!     B -->|"aggregate(&s, scale)?"| C["rolling sums (first scale-1 missing)"]
//!     B -->|"water_balance(&p, &pet)?"| D["P - PET"]
//!     B -->|"fill_missing(&s, method)"| E["gap-filled series"]
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `series` | `TimeSeries`: ordered optional values with optional dates |
//! | `aggregate` | Right-aligned rolling sums |
//! | `balance` | Climatic water balance (precipitation minus PET) |
//! | `fill` | Gap filling (interpolate, forward, backward) |
//! | `error` | Error types |

mod aggregate;
mod balance;
mod error;
mod fill;
mod series;

pub use aggregate::aggregate;
pub use balance::water_balance;
pub use error::SeriesError;
pub use fill::{FillMethod, fill_missing};
pub use series::TimeSeries;

/// Re-exported so callers can build timestamps without naming `chrono`.
pub use chrono::NaiveDate;
