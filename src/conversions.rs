//! Logarithmic unit conversions between magnitude, dB, Np and dBm.
//!
//! `mag_to_db`/`db_to_mag` treat their argument as a field (amplitude)
//! quantity, i.e. 20·log10. Use the `_with` forms and [`ScaleMode::Power`]
//! for power ratios.

use std::f64::consts::LN_10;
use std::str::FromStr;

use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::broadcast::try_map;
use crate::errors::{require_finite, require_positive, RfError, RfResult};
use crate::math::Scalar;

/// Decibels per neper, 20/ln(10) ≈ 8.685889638.
pub const DB_PER_NEPER: Scalar = 20.0 / LN_10;

/// Whether a logarithmic value describes a power or a field ratio.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMode {
    /// 10·log10, for power-like quantities.
    #[default]
    Power,
    /// 20·log10, for field-like quantities (voltage, current, E-field).
    Amplitude,
}

impl ScaleMode {
    /// Multiplier applied to log10 of the ratio.
    #[must_use]
    pub const fn factor(self) -> Scalar {
        match self {
            Self::Power => 10.0,
            Self::Amplitude => 20.0,
        }
    }
}

impl FromStr for ScaleMode {
    type Err = RfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "power" => Ok(Self::Power),
            "amplitude" => Ok(Self::Amplitude),
            _ => Err(RfError::UnknownMode(s.to_owned())),
        }
    }
}

/// Converts a linear field magnitude to dB, 20·log10(x).
///
/// Zero, negative and NaN inputs are domain errors rather than `-inf`/`NaN`.
pub fn mag_to_db(value: Scalar) -> RfResult<Scalar> {
    mag_to_db_with(value, ScaleMode::Amplitude)
}

/// Inverse of [`mag_to_db`], 10^(x/20).
#[must_use]
pub fn db_to_mag(value: Scalar) -> Scalar {
    db_to_mag_with(value, ScaleMode::Amplitude)
}

/// Converts a linear magnitude to dB under the given [`ScaleMode`].
pub fn mag_to_db_with(value: Scalar, mode: ScaleMode) -> RfResult<Scalar> {
    require_positive("magnitude", value)?;
    Ok(mode.factor() * value.log10())
}

/// Converts dB to a linear magnitude under the given [`ScaleMode`].
#[must_use]
pub fn db_to_mag_with(value: Scalar, mode: ScaleMode) -> Scalar {
    10f64.powf(value / mode.factor())
}

/// Converts decibels to nepers.
#[must_use]
pub fn db_to_np(db: Scalar) -> Scalar {
    db / DB_PER_NEPER
}

/// Converts nepers to decibels.
#[must_use]
pub fn np_to_db(nepers: Scalar) -> Scalar {
    nepers * DB_PER_NEPER
}

/// Converts an absolute power level in dBm to watts.
#[must_use]
pub fn dbm_to_watts(dbm: Scalar) -> Scalar {
    db_to_mag_with(dbm, ScaleMode::Power) / 1.0e3
}

/// Converts watts to dBm. Non-positive power has no logarithm.
pub fn watts_to_dbm(watts: Scalar) -> RfResult<Scalar> {
    require_positive("power", watts)?;
    mag_to_db_with(watts * 1.0e3, ScaleMode::Power)
}

/// Absolute power tagged with its unit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Power {
    /// Linear power in watts.
    Watts(Scalar),
    /// Logarithmic power referenced to 1 mW.
    Dbm(Scalar),
}

impl Power {
    /// Power in watts. A linear power of zero or less is rejected.
    pub fn watts(self) -> RfResult<Scalar> {
        match self {
            Self::Watts(w) => require_positive("power", w),
            Self::Dbm(dbm) => Ok(dbm_to_watts(require_finite("power", dbm)?)),
        }
    }

    /// Power in dBm.
    pub fn dbm(self) -> RfResult<Scalar> {
        match self {
            Self::Watts(w) => watts_to_dbm(w),
            Self::Dbm(dbm) => require_finite("power", dbm),
        }
    }
}

/// Element-wise [`mag_to_db`].
pub fn mag_to_db_array<S, D>(values: &ArrayBase<S, D>) -> RfResult<Array<Scalar, D>>
where
    S: Data<Elem = Scalar>,
    D: Dimension,
{
    try_map(values, mag_to_db)
}

/// Element-wise [`db_to_mag`].
#[must_use]
pub fn db_to_mag_array<S, D>(values: &ArrayBase<S, D>) -> Array<Scalar, D>
where
    S: Data<Elem = Scalar>,
    D: Dimension,
{
    values.mapv(db_to_mag)
}

/// Element-wise [`db_to_np`].
#[must_use]
pub fn db_to_np_array<S, D>(values: &ArrayBase<S, D>) -> Array<Scalar, D>
where
    S: Data<Elem = Scalar>,
    D: Dimension,
{
    values.mapv(db_to_np)
}

/// Element-wise [`np_to_db`].
#[must_use]
pub fn np_to_db_array<S, D>(values: &ArrayBase<S, D>) -> Array<Scalar, D>
where
    S: Data<Elem = Scalar>,
    D: Dimension,
{
    values.mapv(np_to_db)
}
