//! Plane-wave propagation in homogeneous media and conductor losses.
//!
//! Uses the `exp(+jωt)` convention of [`crate::dielectrics`], so a wave
//! travelling along +z varies as `exp(−γz)` with `γ = α + jβ` and α ≥ 0 in a
//! passive medium.

use std::f64::consts::PI;

use ndarray::{ArrayBase, ArrayD, Data, Dimension};

use crate::broadcast::{try_zip3_with, try_zip4_with, try_zip_with};
use crate::constants::{
    angular_frequency, free_space_wavelength, FREE_SPACE_IMPEDANCE, VACUUM_PERMEABILITY,
    VACUUM_PERMITTIVITY,
};
use crate::conversions::np_to_db;
use crate::dielectrics::ComplexPermittivity;
use crate::errors::{require_finite, require_positive, RfResult};
use crate::math::{CScalar, Scalar, J};

/// Complex propagation constant γ = α + jβ.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropagationConstant {
    /// Attenuation constant α in Np/m.
    pub alpha: Scalar,
    /// Phase constant β in rad/m.
    pub beta: Scalar,
}

impl PropagationConstant {
    /// γ as a complex number.
    #[must_use]
    pub fn to_complex(&self) -> CScalar {
        CScalar::new(self.alpha, self.beta)
    }

    /// Attenuation in dB/m.
    #[must_use]
    pub fn attenuation_db_per_m(&self) -> Scalar {
        np_to_db(self.alpha)
    }

    /// Depth 1/α at which the amplitude has fallen by 1/e. Needs α > 0.
    pub fn skin_depth(&self) -> RfResult<Scalar> {
        Ok(1.0 / require_positive("attenuation constant", self.alpha)?)
    }

    /// Phase velocity ω/β at the frequency this constant was evaluated at.
    pub fn phase_velocity(&self, frequency_hz: Scalar) -> RfResult<Scalar> {
        phase_velocity(frequency_hz, self.beta)
    }

    /// Wavelength in the medium, 2π/β.
    pub fn wavelength(&self) -> RfResult<Scalar> {
        Ok(2.0 * PI / require_positive("phase constant", self.beta)?)
    }
}

/// Propagation constant of a plane wave, `γ = jω√(μ₀μ_r·ε₀ε_r)`.
///
/// The loss part is taken as |ε''| so that α is never negative. The principal
/// square root is used, which keeps β positive for ε' > 0.
pub fn plane_wave_prop_const(
    frequency_hz: Scalar,
    permittivity: ComplexPermittivity,
    real_permeability: Scalar,
) -> RfResult<PropagationConstant> {
    require_positive("frequency", frequency_hz)?;
    require_positive("real permittivity", permittivity.real)?;
    require_finite("imaginary permittivity", permittivity.imag)?;
    require_positive("real permeability", real_permeability)?;

    let omega = angular_frequency(frequency_hz);
    let eps = CScalar::new(permittivity.real, -permittivity.imag.abs()) * VACUUM_PERMITTIVITY;
    let mu = real_permeability * VACUUM_PERMEABILITY;
    let gamma = J * omega * (eps * mu).sqrt();

    Ok(PropagationConstant {
        alpha: gamma.re,
        beta: gamma.im,
    })
}

/// Element-wise [`plane_wave_prop_const`], broadcasting frequency, ε', ε''
/// and μ_r against each other.
pub fn plane_wave_prop_const_array<S1, S2, S3, S4, D1, D2, D3, D4>(
    frequency_hz: &ArrayBase<S1, D1>,
    real_permittivity: &ArrayBase<S2, D2>,
    imag_permittivity: &ArrayBase<S3, D3>,
    real_permeability: &ArrayBase<S4, D4>,
) -> RfResult<ArrayD<PropagationConstant>>
where
    S1: Data<Elem = Scalar>,
    S2: Data<Elem = Scalar>,
    S3: Data<Elem = Scalar>,
    S4: Data<Elem = Scalar>,
    D1: Dimension,
    D2: Dimension,
    D3: Dimension,
    D4: Dimension,
{
    try_zip4_with(
        frequency_hz,
        real_permittivity,
        imag_permittivity,
        real_permeability,
        |f, re, im, mu| plane_wave_prop_const(f, ComplexPermittivity::new(re, im), mu),
    )
}

/// Phase velocity ω/β in m/s. β must be positive.
pub fn phase_velocity(frequency_hz: Scalar, beta: Scalar) -> RfResult<Scalar> {
    require_positive("frequency", frequency_hz)?;
    require_positive("phase constant", beta)?;
    Ok(angular_frequency(frequency_hz) / beta)
}

/// Element-wise [`phase_velocity`] with broadcasting.
pub fn phase_velocity_array<S1, S2, D1, D2>(
    frequency_hz: &ArrayBase<S1, D1>,
    beta: &ArrayBase<S2, D2>,
) -> RfResult<ArrayD<Scalar>>
where
    S1: Data<Elem = Scalar>,
    S2: Data<Elem = Scalar>,
    D1: Dimension,
    D2: Dimension,
{
    try_zip_with(frequency_hz, beta, phase_velocity)
}

/// Skin depth of a good conductor, `1/√(πfμ₀μ_rσ)` in metres.
pub fn skin_depth(
    frequency_hz: Scalar,
    conductivity: Scalar,
    real_permeability: Scalar,
) -> RfResult<Scalar> {
    require_positive("frequency", frequency_hz)?;
    require_positive("conductivity", conductivity)?;
    require_positive("real permeability", real_permeability)?;
    let product = PI * frequency_hz * conductivity * VACUUM_PERMEABILITY * real_permeability;
    Ok(1.0 / product.sqrt())
}

/// Element-wise [`skin_depth`] over frequency, conductivity and μ_r.
pub fn skin_depth_array<S1, S2, S3, D1, D2, D3>(
    frequency_hz: &ArrayBase<S1, D1>,
    conductivity: &ArrayBase<S2, D2>,
    real_permeability: &ArrayBase<S3, D3>,
) -> RfResult<ArrayD<Scalar>>
where
    S1: Data<Elem = Scalar>,
    S2: Data<Elem = Scalar>,
    S3: Data<Elem = Scalar>,
    D1: Dimension,
    D2: Dimension,
    D3: Dimension,
{
    try_zip3_with(frequency_hz, conductivity, real_permeability, skin_depth)
}

/// Surface resistance `π·η₀·δ/λ₀` of a conductor in ohms (Marcuvitz).
///
/// Equal to `1/(σδ)` for non-magnetic metals.
pub fn surface_resistance(
    frequency_hz: Scalar,
    conductivity: Scalar,
    real_permeability: Scalar,
) -> RfResult<Scalar> {
    let delta = skin_depth(frequency_hz, conductivity, real_permeability)?;
    let wavelength = free_space_wavelength(frequency_hz)?;
    Ok(PI * FREE_SPACE_IMPEDANCE * delta / wavelength)
}

/// Element-wise [`surface_resistance`] over frequency, conductivity and μ_r.
pub fn surface_resistance_array<S1, S2, S3, D1, D2, D3>(
    frequency_hz: &ArrayBase<S1, D1>,
    conductivity: &ArrayBase<S2, D2>,
    real_permeability: &ArrayBase<S3, D3>,
) -> RfResult<ArrayD<Scalar>>
where
    S1: Data<Elem = Scalar>,
    S2: Data<Elem = Scalar>,
    S3: Data<Elem = Scalar>,
    D1: Dimension,
    D2: Dimension,
    D3: Dimension,
{
    try_zip3_with(frequency_hz, conductivity, real_permeability, surface_resistance)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;
    use crate::constants::SPEED_OF_LIGHT;
    use crate::dielectrics::conductivity_to_imaginary_permittivity;
    use crate::errors::RfError;

    const COPPER: Scalar = 5.8e7;

    #[test]
    fn lossless_medium_has_no_attenuation() {
        let f = 1.0e9;
        let gamma = plane_wave_prop_const(f, ComplexPermittivity::lossless(4.0), 1.0).unwrap();
        assert_eq!(gamma.alpha, 0.0);
        let expected_beta = angular_frequency(f) * 2.0 / SPEED_OF_LIGHT;
        assert_relative_eq!(gamma.beta, expected_beta, max_relative = 1e-9);
        assert_relative_eq!(
            gamma.phase_velocity(f).unwrap(),
            SPEED_OF_LIGHT / 2.0,
            max_relative = 1e-9
        );
        assert_relative_eq!(gamma.wavelength().unwrap(), 0.149_896_229, max_relative = 1e-8);
        assert!(matches!(
            gamma.skin_depth(),
            Err(RfError::NonPositive { name: "attenuation constant", .. })
        ));
    }

    #[test]
    fn low_loss_attenuation_follows_loss_tangent() {
        // α ≈ β·tanδ/2 for tanδ ≪ 1
        let f = 10.0e9;
        let eps = ComplexPermittivity::from_loss_tangent(2.2, 1.0e-4).unwrap();
        let gamma = plane_wave_prop_const(f, eps, 1.0).unwrap();
        assert!(gamma.alpha > 0.0);
        assert_relative_eq!(gamma.alpha, gamma.beta * 0.5e-4, max_relative = 1e-6);
        // sign of the supplied loss part does not matter
        let flipped = ComplexPermittivity::new(eps.real, -eps.imag);
        let flipped = plane_wave_prop_const(f, flipped, 1.0).unwrap();
        assert_eq!(flipped, gamma);
    }

    #[test]
    fn copper_skin_depth_at_one_ghz() {
        let delta = skin_depth(1.0e9, COPPER, 1.0).unwrap();
        assert_relative_eq!(delta, 2.089_806_784e-6, max_relative = 1e-8);
        let rs = surface_resistance(1.0e9, COPPER, 1.0).unwrap();
        assert_relative_eq!(rs, 1.0 / (COPPER * delta), max_relative = 1e-8);
    }

    #[test]
    fn plane_wave_skin_depth_matches_good_conductor_formula() {
        let f = 1.0e9;
        let imag = conductivity_to_imaginary_permittivity(f, COPPER).unwrap();
        let gamma = plane_wave_prop_const(f, ComplexPermittivity::new(1.0, imag), 1.0).unwrap();
        let delta = skin_depth(f, COPPER, 1.0).unwrap();
        assert_relative_eq!(gamma.skin_depth().unwrap(), delta, max_relative = 1e-6);
        assert_relative_eq!(gamma.alpha, gamma.beta, max_relative = 1e-6);
    }

    #[test]
    fn invalid_media_are_rejected() {
        let eps = ComplexPermittivity::lossless(1.0);
        assert!(plane_wave_prop_const(0.0, eps, 1.0).is_err());
        assert!(plane_wave_prop_const(1.0e9, ComplexPermittivity::lossless(0.0), 1.0).is_err());
        assert!(plane_wave_prop_const(1.0e9, eps, -1.0).is_err());
        assert!(phase_velocity(1.0e9, 0.0).is_err());
        assert!(skin_depth(1.0e9, 0.0, 1.0).is_err());
        assert!(skin_depth(-1.0e9, COPPER, 1.0).is_err());
    }

    #[test]
    fn arrays_broadcast_frequency_against_media() {
        let freqs = array![[1.0e9], [2.0e9], [4.0e9]];
        let real = array![1.0, 4.0];
        let imag = array![0.0];
        let gammas = plane_wave_prop_const_array(&freqs, &real, &imag, &array![1.0]).unwrap();
        assert_eq!(gammas.shape(), &[3, 2]);
        assert_relative_eq!(gammas[[2, 1]].beta, 4.0 * gammas[[0, 1]].beta, max_relative = 1e-12);
        assert_relative_eq!(gammas[[0, 1]].beta, 2.0 * gammas[[0, 0]].beta, max_relative = 1e-12);

        let betas = gammas.mapv(|g| g.beta);
        let speeds = phase_velocity_array(&freqs, &betas).unwrap();
        assert_relative_eq!(speeds[[1, 1]], SPEED_OF_LIGHT / 2.0, max_relative = 1e-9);

        let freqs = array![1.0e9, 4.0e9];
        let depths = skin_depth_array(&freqs, &array![COPPER], &array![1.0]).unwrap();
        assert_relative_eq!(depths[[0]], 2.0 * depths[[1]], max_relative = 1e-12);
    }

    #[test]
    fn permeability_broadcasts_against_frequency() {
        let freqs = array![[1.0e9], [4.0e9]];
        let mu_r = array![1.0, 4.0, 100.0];
        let gammas =
            plane_wave_prop_const_array(&freqs, &array![1.0], &array![0.0], &mu_r).unwrap();
        assert_eq!(gammas.shape(), &[2, 3]);
        assert_relative_eq!(gammas[[0, 1]].beta, 2.0 * gammas[[0, 0]].beta, max_relative = 1e-12);
        assert_relative_eq!(gammas[[1, 2]].beta, 40.0 * gammas[[0, 0]].beta, max_relative = 1e-12);

        let depths = skin_depth_array(&freqs, &array![COPPER], &mu_r).unwrap();
        assert_eq!(depths.shape(), &[2, 3]);
        assert_relative_eq!(depths[[0, 0]], 2.0 * depths[[0, 1]], max_relative = 1e-12);
        assert_relative_eq!(depths[[0, 0]], 20.0 * depths[[1, 2]], max_relative = 1e-12);

        let rs = surface_resistance_array(&freqs, &array![COPPER], &mu_r).unwrap();
        let single = surface_resistance(4.0e9, COPPER, 100.0).unwrap();
        assert_eq!(rs.shape(), &[2, 3]);
        assert_relative_eq!(rs[[1, 2]], single, max_relative = 1e-12);
        assert_relative_eq!(rs[[0, 1]], 0.5 * rs[[0, 0]], max_relative = 1e-12);

        assert!(skin_depth_array(&freqs, &array![COPPER], &array![1.0, -1.0, 1.0]).is_err());
    }

    #[test]
    fn attenuation_in_db() {
        let gamma = PropagationConstant { alpha: 1.0, beta: 1.0 };
        assert_relative_eq!(gamma.attenuation_db_per_m(), 8.685_889_638, max_relative = 1e-9);
        assert_eq!(gamma.to_complex(), CScalar::new(1.0, 1.0));
    }
}
