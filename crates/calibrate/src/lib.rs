//! # drought-calibrate
//!
//! Least-squares self-calibration of drought index models with a
//! derivative-free Nelder-Mead search, plus the exponential-weighted update
//! rule used to refresh calibrated coefficients as new data arrives.
//!
//! ## Workflow
//!
//! ```mermaid
//! graph LR
//!     A["model: Fn(&I, &CalibrationParams) -> Vec<f64>"] --> C["calibrate(model, observed, &input, &initial, &config)?"]
//!     B["CalibrationParams (initial guess)"] --> C
//!     C --> D["Calibration"]
//!     D --> E[".params()"]
//!     D --> F[".reconstructed()"]
//!     D --> G[".cost() / .rmse()"]
//!     E -->|"update(&old, &new, weights)?"| H["blended CalibrationParams"]
//! ```
//!
//! The model is any closure or function; the input type only needs to
//! report its length through [`ModelInput`].
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `optimizer` | [`calibrate`]: Nelder-Mead minimization of squared residuals |
//! | `update` | [`update`] and [`recalibrate`]: weighted parameter blending |
//! | `pdsi` | [`self_calibrated_pdsi`]: linear water-balance PDSI approximation |

mod config;
mod error;
mod optimizer;
mod params;
mod pdsi;
mod result;
mod update;

pub use config::CalibrationConfig;
pub use error::CalibrationError;
pub use optimizer::{ModelInput, calibrate};
pub use params::CalibrationParams;
pub use pdsi::{PDSI_COEFFICIENTS, PdsiInputs, self_calibrated_pdsi, water_balance_model};
pub use result::Calibration;
pub use update::{UpdateWeights, recalibrate, update};
