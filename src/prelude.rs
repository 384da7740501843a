//! Convenience re-exports for RF calculations.

pub use crate::antennas::{
    antenna_far_field_distance, far_field_distance, first_fresnel_zone_radius,
    fresnel_zone_radius, hertzian_dipole_current, hertzian_dipole_field,
    max_antenna_separation_approx, max_antenna_separation_full, AntennaKind, FresnelClearance,
};
pub use crate::broadcast::{try_map, try_zip3_with, try_zip4_with, try_zip_with};
pub use crate::constants::*;
pub use crate::conversions::{
    db_to_mag, db_to_mag_with, db_to_np, dbm_to_watts, mag_to_db, mag_to_db_with, np_to_db,
    watts_to_dbm, Power, ScaleMode,
};
pub use crate::dielectrics::{
    complex_permittivity_to_tan_delta, conductivity_to_imaginary_permittivity,
    conductivity_to_tan_delta, equivalent_relative_permittivity,
    imaginary_permittivity_to_conductivity, tan_delta_to_conductivity,
    tan_delta_to_imaginary_permittivity, ColeCole, ComplexPermittivity, Debye, DebyePole,
    DielectricLayer, DispersiveModel,
};
pub use crate::errors::{RfError, RfResult};
pub use crate::math::{CScalar, Scalar};
pub use crate::propagation::{
    phase_velocity, plane_wave_prop_const, skin_depth, surface_resistance, PropagationConstant,
};
