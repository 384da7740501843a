#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Fundamental physical constants and frequency helpers.
pub mod constants;
/// Shared scalar and complex aliases.
pub mod math;
/// Error type and input checks shared between modules.
pub mod errors;
/// Element-wise evaluation over `ndarray` arrays with broadcasting.
pub mod broadcast;
/// Fresnel zones, far-field distance and the Hertzian dipole.
pub mod antennas;
/// dB, Np, dBm and linear magnitude conversions.
pub mod conversions;
/// Complex permittivity representations and relaxation models.
pub mod dielectrics;
/// Plane-wave propagation constants and conductor losses.
pub mod propagation;

/// Common exports for downstream crates.
pub mod prelude;
