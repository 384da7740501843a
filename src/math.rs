//! Shared numerical primitives anchored on `num-complex`.

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for phasors and complex permittivity.
pub type CScalar = num_complex::Complex<Scalar>;

/// Imaginary unit `j`.
pub const J: CScalar = CScalar::new(0.0, 1.0);

/// Returns the complex exponential `e^(j * theta)` using `Scalar` precision.
#[must_use]
pub fn phasor(theta: Scalar) -> CScalar {
    CScalar::from_polar(1.0, theta)
}
