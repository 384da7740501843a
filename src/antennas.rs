//! Antenna geometry: Fresnel zones, far-field distance and the Hertzian dipole.
//!
//! Frequencies are in hertz, every length in metres.

use std::f64::consts::PI;
use std::str::FromStr;

use ndarray::{ArrayBase, ArrayD, Data, Dimension};
use tracing::warn;

use crate::broadcast::try_zip_with;
use crate::constants::{free_space_wavelength, wavenumber, FREE_SPACE_IMPEDANCE};
use crate::conversions::Power;
use crate::errors::{require_finite, require_non_negative, require_positive, RfError, RfResult};
use crate::math::{phasor, CScalar, Scalar, J};

/// Fraction of the first Fresnel zone that a [`FresnelClearance::Partial`]
/// link keeps free of obstacles.
pub const PARTIAL_CLEARANCE: Scalar = 0.6;

/// How much of the first Fresnel zone must stay clear.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FresnelClearance {
    /// The whole zone is clear.
    #[default]
    Full,
    /// Only 60 % of the zone radius is clear.
    Partial,
}

impl FresnelClearance {
    /// Zone radius needed for an obstacle-free radius of `radius`.
    #[must_use]
    pub fn zone_radius(self, radius: Scalar) -> Scalar {
        match self {
            Self::Full => radius,
            Self::Partial => radius / PARTIAL_CLEARANCE,
        }
    }
}

impl FromStr for FresnelClearance {
    type Err = RfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" | "full" => Ok(Self::Full),
            "cheeky" | "partial" => Ok(Self::Partial),
            _ => Err(RfError::UnknownMode(s.to_owned())),
        }
    }
}

/// Radius of the n-th Fresnel zone at `distance_to_point` along a path of
/// length `total_distance`: `√(n·λ·d₁·d₂/(d₁+d₂))`.
///
/// Assumes both distances are large compared with the wavelength.
pub fn fresnel_zone_radius(
    order: u32,
    distance_to_point: Scalar,
    total_distance: Scalar,
    wavelength: Scalar,
) -> RfResult<Scalar> {
    if order == 0 {
        return Err(RfError::InvalidOrder);
    }
    require_positive("distance to point", distance_to_point)?;
    require_positive("total distance", total_distance)?;
    require_positive("wavelength", wavelength)?;
    if distance_to_point >= total_distance {
        return Err(RfError::OutsidePath {
            distance: distance_to_point,
            total: total_distance,
        });
    }

    let remaining = total_distance - distance_to_point;
    let product = Scalar::from(order) * wavelength * distance_to_point * remaining;
    Ok((product / total_distance).sqrt())
}

/// First Fresnel zone radius from the distances to either terminal.
///
/// Evaluated as `√(λ·d₁·d₂/(d₁+d₂))` so a point very close to one terminal
/// keeps its small, positive radius.
pub fn first_fresnel_zone_radius(
    frequency_hz: Scalar,
    distance_1: Scalar,
    distance_2: Scalar,
) -> RfResult<Scalar> {
    let wavelength = free_space_wavelength(frequency_hz)?;
    require_positive("distance 1", distance_1)?;
    require_positive("distance 2", distance_2)?;
    Ok((wavelength * distance_1 * distance_2 / (distance_1 + distance_2)).sqrt())
}

/// Element-wise [`fresnel_zone_radius`] over point positions and wavelengths.
pub fn fresnel_zone_radius_array<S1, S2, D1, D2>(
    order: u32,
    distance_to_point: &ArrayBase<S1, D1>,
    total_distance: Scalar,
    wavelength: &ArrayBase<S2, D2>,
) -> RfResult<ArrayD<Scalar>>
where
    S1: Data<Elem = Scalar>,
    S2: Data<Elem = Scalar>,
    D1: Dimension,
    D2: Dimension,
{
    try_zip_with(distance_to_point, wavelength, |d, lambda| {
        fresnel_zone_radius(order, d, total_distance, lambda)
    })
}

/// Longest link for which the first Fresnel zone at mid-path stays within
/// `radius`, from the exact ellipsoid `(16r² − λ²)/(4λ)`.
///
/// Small radii at low frequency yield a negative separation. It is returned
/// as computed, although it has no physical meaning.
pub fn max_antenna_separation_full(
    frequency_hz: Scalar,
    radius: Scalar,
    clearance: FresnelClearance,
) -> RfResult<Scalar> {
    let wavelength = free_space_wavelength(frequency_hz)?;
    let r = clearance.zone_radius(require_positive("radius", radius)?);
    let separation = (16.0 * r.powi(2) - wavelength.powi(2)) / (4.0 * wavelength);
    if separation < 0.0 {
        warn!(frequency_hz, radius, separation, "negative antenna separation");
    }
    Ok(separation)
}

/// Longest link for a first Fresnel zone radius `radius`, far-apart
/// approximation `4r²/λ`.
pub fn max_antenna_separation_approx(
    frequency_hz: Scalar,
    radius: Scalar,
    clearance: FresnelClearance,
) -> RfResult<Scalar> {
    let wavelength = free_space_wavelength(frequency_hz)?;
    let r = clearance.zone_radius(require_positive("radius", radius)?);
    Ok(4.0 * r.powi(2) / wavelength)
}

/// Minimum Fraunhofer distance `2D²/λ` for an antenna of largest dimension `D`.
pub fn far_field_distance(largest_dimension: Scalar, wavelength: Scalar) -> RfResult<Scalar> {
    require_non_negative("largest dimension", largest_dimension)?;
    require_positive("wavelength", wavelength)?;
    Ok(2.0 * largest_dimension.powi(2) / wavelength)
}

/// Element-wise [`far_field_distance`] with broadcasting.
pub fn far_field_distance_array<S1, S2, D1, D2>(
    largest_dimension: &ArrayBase<S1, D1>,
    wavelength: &ArrayBase<S2, D2>,
) -> RfResult<ArrayD<Scalar>>
where
    S1: Data<Elem = Scalar>,
    S2: Data<Elem = Scalar>,
    D1: Dimension,
    D2: Dimension,
{
    try_zip_with(largest_dimension, wavelength, far_field_distance)
}

/// Antenna families whose size follows from the operating wavelength.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AntennaKind {
    /// Quarter-wave monopole.
    Monopole,
    /// Half-wave dipole.
    Dipole,
    /// Linear array of `elements` at half-wavelength spacing.
    Array {
        /// Element count along the longest side.
        elements: u32,
    },
    /// Any antenna of known physical size.
    Aperture {
        /// Largest dimension in metres.
        dimension: Scalar,
    },
}

impl AntennaKind {
    /// Largest physical dimension at `wavelength`.
    #[must_use]
    pub fn largest_dimension(&self, wavelength: Scalar) -> Scalar {
        match *self {
            Self::Monopole => wavelength / 4.0,
            Self::Dipole => wavelength / 2.0,
            Self::Array { elements } => Scalar::from(elements) * wavelength / 2.0,
            Self::Aperture { dimension } => dimension,
        }
    }
}

/// Far-field distance of a typical antenna at `frequency_hz`.
pub fn antenna_far_field_distance(frequency_hz: Scalar, kind: AntennaKind) -> RfResult<Scalar> {
    let wavelength = free_space_wavelength(frequency_hz)?;
    far_field_distance(kind.largest_dimension(wavelength), wavelength)
}

fn warn_if_not_small(length: Scalar, wavelength: Scalar) {
    if length > wavelength / 10.0 {
        warn!(length, wavelength, "dipole is not electrically small");
    }
}

/// θ-component of the electric field radiated by a Hertzian dipole, in V/m.
///
/// `current` is the peak current in amperes and `angle` the polar angle θ
/// from the dipole axis in radians. The result is the complete phasor
///
/// ```text
/// E_θ = jηkIl·sinθ/(4πr) · [1 + 1/(jkr) − 1/(kr)²] · e^(−jkr)
/// ```
///
/// so it stays valid in the near and intermediate zones. Take `.norm()` for
/// the field magnitude.
pub fn hertzian_dipole_field(
    current: Scalar,
    length: Scalar,
    distance: Scalar,
    wavelength: Scalar,
    angle: Scalar,
) -> RfResult<CScalar> {
    require_finite("current", current)?;
    require_positive("length", length)?;
    require_positive("distance", distance)?;
    require_positive("wavelength", wavelength)?;
    require_finite("angle", angle)?;
    warn_if_not_small(length, wavelength);

    let k = wavenumber(wavelength);
    let kr = k * distance;
    let amplitude =
        FREE_SPACE_IMPEDANCE * k * current * length * angle.sin() / (4.0 * PI * distance);
    let zones = 1.0 + 1.0 / (J * kr) - 1.0 / kr.powi(2);
    let retardation = phasor(-kr);
    Ok(J * amplitude * zones * retardation)
}

/// Element-wise [`hertzian_dipole_field`] over distances and angles.
pub fn hertzian_dipole_field_array<S1, S2, D1, D2>(
    current: Scalar,
    length: Scalar,
    distance: &ArrayBase<S1, D1>,
    wavelength: Scalar,
    angle: &ArrayBase<S2, D2>,
) -> RfResult<ArrayD<CScalar>>
where
    S1: Data<Elem = Scalar>,
    S2: Data<Elem = Scalar>,
    D1: Dimension,
    D2: Dimension,
{
    try_zip_with(distance, angle, |r, theta| {
        hertzian_dipole_field(current, length, r, wavelength, theta)
    })
}

/// Peak current a Hertzian dipole needs to radiate `power`,
/// from `P = 40π²(l/λ)²·I²`.
///
/// Only meaningful for a time-harmonic excitation.
pub fn hertzian_dipole_current(
    frequency_hz: Scalar,
    power: Power,
    length: Scalar,
) -> RfResult<Scalar> {
    let watts = power.watts()?;
    let wavelength = free_space_wavelength(frequency_hz)?;
    require_positive("length", length)?;
    warn_if_not_small(length, wavelength);

    let radiation = 40.0 * PI.powi(2) * (length / wavelength).powi(2);
    Ok((watts / radiation).sqrt())
}
