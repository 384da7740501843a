//! Physical constants and frequency helpers shared by every submodule.
//!
//! ## Accuracy
//!
//! Constants marked "exact" have zero uncertainty by SI definition (2019 revision).
//! ε₀ and μ₀ are the CODATA 2018 values, which is what most RF tooling still
//! ships with. They differ from CODATA 2022 only in the last printed digits.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty:
//!   <https://physics.nist.gov/cuu/Constants/>
//! - Tiesinga, E. et al. (2021). CODATA Recommended Values of the Fundamental
//!   Physical Constants: 2018.

use std::f64::consts::PI;

use crate::errors::{require_positive, RfResult};
use crate::math::Scalar;

/// Vacuum permittivity ε₀ in farads per meter (F/m).
pub const VACUUM_PERMITTIVITY: Scalar = 8.854_187_812_8e-12;
/// Vacuum permeability μ₀ in henries per meter (H/m).
pub const VACUUM_PERMEABILITY: Scalar = 1.256_637_062_12e-6;
/// Speed of light in vacuum _c_ in meters per second (m/s). Exact.
pub const SPEED_OF_LIGHT: Scalar = 299_792_458.0;
/// Characteristic impedance of free space η₀ = √(μ₀/ε₀) in ohms (Ω).
pub const FREE_SPACE_IMPEDANCE: Scalar = 376.730_313_668;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: Scalar) -> Scalar {
    2.0 * PI * hz
}

/// Returns the free-space wavelength in meters for a given frequency in hertz.
///
/// Unchecked; see [`free_space_wavelength`] for the validating form.
#[inline]
#[must_use]
pub fn wavelength_from_frequency(hz: Scalar) -> Scalar {
    SPEED_OF_LIGHT / hz
}

/// Free-space wavelength for `frequency_hz`, rejecting zero, negative and
/// non-finite frequencies.
pub fn free_space_wavelength(frequency_hz: Scalar) -> RfResult<Scalar> {
    require_positive("frequency", frequency_hz)?;
    Ok(wavelength_from_frequency(frequency_hz))
}

/// Free-space wavenumber k₀ = 2π/λ₀ in rad/m.
#[inline]
#[must_use]
pub fn wavenumber(wavelength: Scalar) -> Scalar {
    2.0 * PI / wavelength
}
