//! Representations of lossy dielectrics and their relaxation models.
//!
//! ## Sign convention
//!
//! Time-harmonic quantities vary as `exp(+jωt)` throughout this crate. Under
//! that convention the complex relative permittivity of a passive medium is
//!
//! ```text
//! ε_r = ε' − jε''    with ε'' ≥ 0
//! ```
//!
//! and a static conductivity σ contributes `σ/(jωε₀) = −jσ/(ωε₀)`. Inputs named
//! `imag` or `imag_permittivity` are the magnitude ε''; its sign is taken as
//! the absolute value where the formula only makes sense for loss.
//!
//! Frequencies are in hertz, conductivities in S/m.

use ndarray::{ArrayBase, ArrayD, Data, Dimension};
use tracing::debug;

use crate::broadcast::try_zip_with;
use crate::constants::{angular_frequency, VACUUM_PERMITTIVITY};
use crate::errors::{
    require_finite, require_non_negative, require_nonzero, require_positive, RfError, RfResult,
};
use crate::math::{CScalar, Scalar, J};

/// Complex relative permittivity `ε' − jε''`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexPermittivity {
    /// Real part ε'.
    pub real: Scalar,
    /// Loss part ε'' (non-negative for passive media).
    pub imag: Scalar,
}

impl ComplexPermittivity {
    /// Builds a permittivity from its real and loss parts.
    #[must_use]
    pub const fn new(real: Scalar, imag: Scalar) -> Self {
        Self { real, imag }
    }

    /// Lossless medium with relative permittivity `real`.
    #[must_use]
    pub const fn lossless(real: Scalar) -> Self {
        Self { real, imag: 0.0 }
    }

    /// Builds ε' − jε'' from ε' and a loss tangent.
    pub fn from_loss_tangent(real: Scalar, tan_delta: Scalar) -> RfResult<Self> {
        let imag = tan_delta_to_imaginary_permittivity(real, tan_delta)?;
        Ok(Self { real, imag })
    }

    /// Builds ε' − jε'' for a medium whose loss comes from conductivity σ.
    pub fn from_conductivity(
        real: Scalar,
        frequency_hz: Scalar,
        conductivity: Scalar,
    ) -> RfResult<Self> {
        let imag = conductivity_to_imaginary_permittivity(frequency_hz, conductivity)?;
        Ok(Self { real, imag })
    }

    /// Loss tangent ε''/ε'.
    pub fn loss_tangent(&self) -> RfResult<Scalar> {
        complex_permittivity_to_tan_delta(self.real, self.imag)
    }

    /// Complex number `ε' − jε''`.
    #[must_use]
    pub fn to_complex(&self) -> CScalar {
        CScalar::new(self.real, -self.imag)
    }

    /// Reads ε' and ε'' back out of a complex value in `ε' − jε''` form.
    #[must_use]
    pub fn from_complex(value: CScalar) -> Self {
        Self {
            real: value.re,
            imag: -value.im,
        }
    }
}

impl From<ComplexPermittivity> for CScalar {
    fn from(value: ComplexPermittivity) -> Self {
        value.to_complex()
    }
}

/// Loss tangent |ε''|/|ε'| of a complex relative permittivity.
pub fn complex_permittivity_to_tan_delta(real: Scalar, imag: Scalar) -> RfResult<Scalar> {
    require_nonzero("real permittivity", real)?;
    require_finite("imaginary permittivity", imag)?;
    Ok(imag.abs() / real.abs())
}

/// Loss part ε'' = tanδ·|ε'|, the inverse of [`complex_permittivity_to_tan_delta`].
pub fn tan_delta_to_imaginary_permittivity(real: Scalar, tan_delta: Scalar) -> RfResult<Scalar> {
    require_finite("real permittivity", real)?;
    require_non_negative("loss tangent", tan_delta)?;
    Ok(tan_delta * real.abs())
}

/// Loss part ε'' = σ/(ωε₀) contributed by conductivity σ at `frequency_hz`.
pub fn conductivity_to_imaginary_permittivity(
    frequency_hz: Scalar,
    conductivity: Scalar,
) -> RfResult<Scalar> {
    require_positive("frequency", frequency_hz)?;
    require_non_negative("conductivity", conductivity)?;
    Ok(conductivity / (angular_frequency(frequency_hz) * VACUUM_PERMITTIVITY))
}

/// Conductivity σ = ωε₀|ε''| equivalent to a loss part at `frequency_hz`.
pub fn imaginary_permittivity_to_conductivity(
    frequency_hz: Scalar,
    imag: Scalar,
) -> RfResult<Scalar> {
    require_positive("frequency", frequency_hz)?;
    require_finite("imaginary permittivity", imag)?;
    Ok(angular_frequency(frequency_hz) * VACUUM_PERMITTIVITY * imag.abs())
}

/// Loss tangent σ/(ωε₀ε') of a conducting dielectric.
pub fn conductivity_to_tan_delta(
    frequency_hz: Scalar,
    conductivity: Scalar,
    real: Scalar,
) -> RfResult<Scalar> {
    require_non_negative("real permittivity", real)?;
    require_nonzero("real permittivity", real)?;
    let imag = conductivity_to_imaginary_permittivity(frequency_hz, conductivity)?;
    Ok(imag / real)
}

/// Conductivity ωε₀ε'·tanδ equivalent to a loss tangent.
pub fn tan_delta_to_conductivity(
    frequency_hz: Scalar,
    real: Scalar,
    tan_delta: Scalar,
) -> RfResult<Scalar> {
    require_non_negative("real permittivity", real)?;
    let imag = tan_delta_to_imaginary_permittivity(real, tan_delta)?;
    imaginary_permittivity_to_conductivity(frequency_hz, imag)
}

/// Element-wise [`complex_permittivity_to_tan_delta`] with broadcasting.
pub fn complex_permittivity_to_tan_delta_array<S1, S2, D1, D2>(
    real: &ArrayBase<S1, D1>,
    imag: &ArrayBase<S2, D2>,
) -> RfResult<ArrayD<Scalar>>
where
    S1: Data<Elem = Scalar>,
    S2: Data<Elem = Scalar>,
    D1: Dimension,
    D2: Dimension,
{
    try_zip_with(real, imag, complex_permittivity_to_tan_delta)
}

/// Element-wise [`conductivity_to_imaginary_permittivity`] with broadcasting.
pub fn conductivity_to_imaginary_permittivity_array<S1, S2, D1, D2>(
    frequency_hz: &ArrayBase<S1, D1>,
    conductivity: &ArrayBase<S2, D2>,
) -> RfResult<ArrayD<Scalar>>
where
    S1: Data<Elem = Scalar>,
    S2: Data<Elem = Scalar>,
    D1: Dimension,
    D2: Dimension,
{
    try_zip_with(frequency_hz, conductivity, conductivity_to_imaginary_permittivity)
}

/// One slab of a stratified dielectric.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DielectricLayer {
    /// Real relative permittivity of the layer.
    pub permittivity: Scalar,
    /// Layer thickness. Any unit, as long as all layers share it.
    pub thickness: Scalar,
}

impl DielectricLayer {
    /// Layer of relative permittivity `permittivity` and given thickness.
    #[must_use]
    pub const fn new(permittivity: Scalar, thickness: Scalar) -> Self {
        Self {
            permittivity,
            thickness,
        }
    }
}

/// Equivalent real permittivity of a layer stack, low-frequency series rule
/// `1/ε_eff = Σ (tᵢ/T)/εᵢ`.
///
/// The approximation holds while the layers stay electrically thin, which in
/// practice covers most stack-ups up to about 100 GHz.
pub fn equivalent_relative_permittivity(layers: &[DielectricLayer]) -> RfResult<Scalar> {
    if layers.is_empty() {
        return Err(RfError::Empty("layers"));
    }
    let mut total = 0.0;
    for layer in layers {
        require_nonzero("layer permittivity", layer.permittivity)?;
        total += require_non_negative("layer thickness", layer.thickness)?;
    }
    require_positive("total thickness", total)?;

    let inverse: Scalar = layers
        .iter()
        .map(|layer| layer.thickness / (layer.permittivity * total))
        .sum();
    let eps_eff = 1.0 / require_nonzero("inverse permittivity sum", inverse)?;
    debug!(layers = layers.len(), total, eps_eff, "equivalent permittivity");
    Ok(eps_eff)
}

/// Frequency-dependent relative permittivity model.
pub trait DispersiveModel {
    /// Complex relative permittivity `ε' − jε''` at `frequency_hz`.
    fn relative_permittivity(&self, frequency_hz: Scalar) -> RfResult<CScalar>;

    /// Same as [`Self::relative_permittivity`], split into ε' and ε''.
    fn permittivity(&self, frequency_hz: Scalar) -> RfResult<ComplexPermittivity> {
        self.relative_permittivity(frequency_hz)
            .map(ComplexPermittivity::from_complex)
    }
}

/// `σ/(jωε₀)`, the conduction term shared by the relaxation models.
fn conduction_term(omega: Scalar, conductivity: Scalar) -> CScalar {
    conductivity / (J * omega * VACUUM_PERMITTIVITY)
}

/// Single-pole Cole-Cole relaxation with static conductivity.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColeCole {
    /// Relative permittivity at DC, ε_s.
    pub er_static: Scalar,
    /// Relative permittivity at infinite frequency, ε∞.
    pub er_inf: Scalar,
    /// Static conductivity σ in S/m.
    pub conductivity: Scalar,
    /// Relaxation time τ in seconds.
    pub relax_time: Scalar,
    /// Broadening exponent α in [0, 1). α = 0 reduces to Debye.
    pub alpha: Scalar,
}

impl DispersiveModel for ColeCole {
    fn relative_permittivity(&self, frequency_hz: Scalar) -> RfResult<CScalar> {
        require_positive("frequency", frequency_hz)?;
        require_finite("er_static", self.er_static)?;
        require_finite("er_inf", self.er_inf)?;
        require_non_negative("conductivity", self.conductivity)?;
        require_non_negative("relaxation time", self.relax_time)?;
        require_finite("alpha", self.alpha)?;
        if !(0.0..1.0).contains(&self.alpha) {
            return Err(RfError::OutOfRange {
                name: "alpha",
                value: self.alpha,
                min: 0.0,
                max: 1.0,
            });
        }

        let omega = angular_frequency(frequency_hz);
        let base = J * omega * self.relax_time;
        let relaxation = (self.er_static - self.er_inf) / (1.0 + base.powf(1.0 - self.alpha));
        let eps = self.er_inf + relaxation + conduction_term(omega, self.conductivity);
        debug!(frequency_hz, re = eps.re, im = eps.im, "cole-cole");
        Ok(eps)
    }
}

/// One pole of a multipole Debye model.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebyePole {
    /// Pole amplitude Δε.
    pub amplitude: Scalar,
    /// Relaxation time τ in seconds.
    pub relax_time: Scalar,
}

/// Multipole Debye relaxation with static conductivity.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Debye {
    /// Relative permittivity at infinite frequency, ε∞.
    pub er_inf: Scalar,
    /// Static conductivity σ in S/m.
    pub conductivity: Scalar,
    /// Relaxation poles.
    pub poles: Vec<DebyePole>,
}

impl DispersiveModel for Debye {
    fn relative_permittivity(&self, frequency_hz: Scalar) -> RfResult<CScalar> {
        require_positive("frequency", frequency_hz)?;
        require_finite("er_inf", self.er_inf)?;
        require_non_negative("conductivity", self.conductivity)?;
        if self.poles.is_empty() {
            return Err(RfError::Empty("poles"));
        }

        let omega = angular_frequency(frequency_hz);
        let mut relaxation = CScalar::new(0.0, 0.0);
        for pole in &self.poles {
            require_finite("pole amplitude", pole.amplitude)?;
            require_non_negative("relaxation time", pole.relax_time)?;
            relaxation += pole.amplitude / (1.0 + J * omega * pole.relax_time);
        }
        let eps = self.er_inf + relaxation + conduction_term(omega, self.conductivity);
        debug!(frequency_hz, poles = self.poles.len(), re = eps.re, im = eps.im, "debye");
        Ok(eps)
    }
}

/// Shorthand for evaluating a [`ColeCole`] model once.
pub fn cole_cole_single(
    frequency_hz: Scalar,
    er_static: Scalar,
    er_inf: Scalar,
    conductivity: Scalar,
    relax_time: Scalar,
    alpha: Scalar,
) -> RfResult<CScalar> {
    ColeCole {
        er_static,
        er_inf,
        conductivity,
        relax_time,
        alpha,
    }
    .relative_permittivity(frequency_hz)
}

/// Shorthand for evaluating a [`Debye`] model once.
pub fn debye_multipole(
    frequency_hz: Scalar,
    er_inf: Scalar,
    conductivity: Scalar,
    poles: &[DebyePole],
) -> RfResult<CScalar> {
    Debye {
        er_inf,
        conductivity,
        poles: poles.to_vec(),
    }
    .relative_permittivity(frequency_hz)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn loss_tangent_of_fr4() {
        let eps = ComplexPermittivity::new(4.4, 0.088);
        assert_relative_eq!(eps.loss_tangent().unwrap(), 0.02, max_relative = 1e-12);
        assert_eq!(eps.to_complex(), CScalar::new(4.4, -0.088));
        assert_eq!(ComplexPermittivity::from_complex(eps.to_complex()), eps);
    }

    #[test]
    fn zero_real_part_has_no_loss_tangent() {
        assert_eq!(
            complex_permittivity_to_tan_delta(0.0, 1.0),
            Err(RfError::Zero { name: "real permittivity" })
        );
    }

    #[test]
    fn conductivity_and_loss_part_are_inverse() {
        let f = 2.45e9;
        let imag = conductivity_to_imaginary_permittivity(f, 1.5).unwrap();
        assert_relative_eq!(imag, 11.005, max_relative = 1e-3);
        let sigma = imaginary_permittivity_to_conductivity(f, imag).unwrap();
        assert_relative_eq!(sigma, 1.5, max_relative = 1e-12);
    }

    #[test]
    fn dc_has_no_conductivity_mapping() {
        assert!(matches!(
            conductivity_to_imaginary_permittivity(0.0, 1.0),
            Err(RfError::NonPositive { name: "frequency", .. })
        ));
        assert!(imaginary_permittivity_to_conductivity(0.0, 1.0).is_err());
    }

    #[test]
    fn tan_delta_and_conductivity_are_inverse() {
        let f = 10.0e9;
        let tan_delta = conductivity_to_tan_delta(f, 0.01, 2.2).unwrap();
        let sigma = tan_delta_to_conductivity(f, 2.2, tan_delta).unwrap();
        assert_relative_eq!(sigma, 0.01, max_relative = 1e-12);
        assert!(matches!(
            conductivity_to_tan_delta(f, -0.01, 2.2),
            Err(RfError::Negative { name: "conductivity", .. })
        ));
        assert!(tan_delta_to_conductivity(f, -2.2, 0.01).is_err());
    }

    #[test]
    fn layered_stack_uses_series_rule() {
        let layers = [DielectricLayer::new(2.0, 1.0), DielectricLayer::new(4.0, 1.0)];
        // 1/eps = 0.5/2 + 0.5/4
        assert_relative_eq!(
            equivalent_relative_permittivity(&layers).unwrap(),
            8.0 / 3.0,
            max_relative = 1e-12
        );
        let single = [DielectricLayer::new(3.5, 0.2)];
        assert_relative_eq!(equivalent_relative_permittivity(&single).unwrap(), 3.5);
    }

    #[test]
    fn degenerate_stacks_fail() {
        assert_eq!(equivalent_relative_permittivity(&[]), Err(RfError::Empty("layers")));
        assert!(equivalent_relative_permittivity(&[DielectricLayer::new(2.0, 0.0)]).is_err());
        assert!(equivalent_relative_permittivity(&[DielectricLayer::new(0.0, 1.0)]).is_err());
    }

    #[test]
    fn single_pole_debye_matches_cole_cole_without_broadening() {
        let f = 1.0e9;
        let tau = 8.3e-12;
        let cc = cole_cole_single(f, 80.0, 5.0, 0.5, tau, 0.0).unwrap();
        let pole = DebyePole { amplitude: 75.0, relax_time: tau };
        let db = debye_multipole(f, 5.0, 0.5, &[pole]).unwrap();
        assert_relative_eq!(cc.re, db.re, max_relative = 1e-9);
        assert_relative_eq!(cc.im, db.im, max_relative = 1e-9);
    }

    #[test]
    fn relaxation_models_are_passive() {
        let water = Debye {
            er_inf: 4.9,
            conductivity: 0.0,
            poles: vec![DebyePole { amplitude: 73.1, relax_time: 9.4e-12 }],
        };
        let eps = water.permittivity(10.0e9).unwrap();
        assert!(eps.imag > 0.0);
        assert!(eps.real > 4.9 && eps.real < 78.0);
    }

    #[test]
    fn conduction_term_is_negative_imaginary() {
        let model = ColeCole {
            er_static: 1.0,
            er_inf: 1.0,
            conductivity: 1.0,
            relax_time: 0.0,
            alpha: 0.0,
        };
        let f = 1.0e6;
        let eps = model.relative_permittivity(f).unwrap();
        let expected = conductivity_to_imaginary_permittivity(f, 1.0).unwrap();
        assert_relative_eq!(eps.re, 1.0, max_relative = 1e-12);
        assert_relative_eq!(eps.im, -expected, max_relative = 1e-12);
    }

    #[test]
    fn cole_cole_alpha_must_be_below_one() {
        let err = cole_cole_single(1.0e9, 10.0, 2.0, 0.0, 1e-11, 1.0).unwrap_err();
        assert!(matches!(err, RfError::OutOfRange { name: "alpha", .. }));
        assert!(debye_multipole(1.0e9, 2.0, 0.0, &[]).is_err());
        assert!(cole_cole_single(0.0, 10.0, 2.0, 0.0, 1e-11, 0.1).is_err());
    }

    #[test]
    fn non_finite_model_parameters_are_rejected() {
        assert_eq!(
            cole_cole_single(1.0e9, Scalar::NAN, 5.0, 0.0, 1e-11, 0.1),
            Err(RfError::NotFinite { name: "er_static" })
        );
        assert_eq!(
            cole_cole_single(1.0e9, 80.0, Scalar::INFINITY, 0.0, 1e-11, 0.1),
            Err(RfError::NotFinite { name: "er_inf" })
        );
        let good = DebyePole { amplitude: 10.0, relax_time: 1e-11 };
        assert_eq!(
            debye_multipole(1.0e9, Scalar::INFINITY, 0.0, &[good]),
            Err(RfError::NotFinite { name: "er_inf" })
        );
        let bad = DebyePole { amplitude: Scalar::NAN, relax_time: 1e-11 };
        assert_eq!(
            debye_multipole(1.0e9, 5.0, 0.0, &[good, bad]),
            Err(RfError::NotFinite { name: "pole amplitude" })
        );
    }

    #[test]
    fn loss_tangent_broadcasts_over_arrays() {
        let real = array![[2.0], [4.0]];
        let imag = array![0.02, 0.04];
        let tan = complex_permittivity_to_tan_delta_array(&real, &imag).unwrap();
        assert_eq!(tan.shape(), &[2, 2]);
        assert_relative_eq!(tan[[1, 1]], 0.01, max_relative = 1e-12);
    }

    #[test]
    fn conductivity_sweep_over_frequency() {
        let freqs = array![1.0e9, 2.0e9];
        let imag = conductivity_to_imaginary_permittivity_array(&freqs, &array![0.1]).unwrap();
        assert_relative_eq!(imag[[0]], 2.0 * imag[[1]], max_relative = 1e-12);
        assert!(conductivity_to_imaginary_permittivity_array(&array![0.0], &array![0.1]).is_err());
    }

    proptest! {
        #[test]
        fn loss_tangent_round_trips(real in 1.0f64..100.0, imag in 0.0f64..50.0) {
            let tan = complex_permittivity_to_tan_delta(real, imag).unwrap();
            let back = ComplexPermittivity::from_loss_tangent(real, tan).unwrap();
            prop_assert!((back.imag - imag).abs() <= 1e-9 * imag.max(1.0));
            prop_assert_eq!(back.real, real);
        }
    }
}
