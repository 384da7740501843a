//! Element-wise evaluation of the scalar formulas over `ndarray` arrays.
//!
//! Shapes combine with NumPy's rules: dimensions are aligned from the
//! trailing end and a length-1 axis stretches to match the other operand.
//! Evaluation stops at the first element that returns an error.

use ndarray::{Array, ArrayBase, ArrayD, Data, Dimension, ErrorKind, IxDyn, ShapeError};

use crate::errors::RfResult;
use crate::math::Scalar;

fn incompatible() -> ShapeError {
    ShapeError::from_kind(ErrorKind::IncompatibleShape)
}

/// Common shape of several operands under broadcasting rules.
pub fn broadcast_shape(shapes: &[&[usize]]) -> RfResult<IxDyn> {
    let ndim = shapes.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut out = vec![1usize; ndim];
    for shape in shapes {
        let offset = ndim - shape.len();
        for (axis, &len) in shape.iter().enumerate() {
            let slot = &mut out[offset + axis];
            if *slot == 1 {
                *slot = len;
            } else if len != 1 && len != *slot {
                return Err(incompatible().into());
            }
        }
    }
    Ok(IxDyn(&out))
}

/// Applies a fallible scalar function to every element, keeping the shape.
pub fn try_map<S, D, T, F>(values: &ArrayBase<S, D>, mut f: F) -> RfResult<Array<T, D>>
where
    S: Data<Elem = Scalar>,
    D: Dimension,
    F: FnMut(Scalar) -> RfResult<T>,
{
    let mut out = Vec::with_capacity(values.len());
    for &v in values.iter() {
        out.push(f(v)?);
    }
    Ok(Array::from_shape_vec(values.raw_dim(), out)?)
}

/// Broadcasts two operands together and applies `f` element-wise.
pub fn try_zip_with<S1, S2, D1, D2, T, F>(
    a: &ArrayBase<S1, D1>,
    b: &ArrayBase<S2, D2>,
    mut f: F,
) -> RfResult<ArrayD<T>>
where
    S1: Data<Elem = Scalar>,
    S2: Data<Elem = Scalar>,
    D1: Dimension,
    D2: Dimension,
    F: FnMut(Scalar, Scalar) -> RfResult<T>,
{
    let shape = broadcast_shape(&[a.shape(), b.shape()])?;
    let va = a.broadcast(shape.clone()).ok_or_else(incompatible)?;
    let vb = b.broadcast(shape.clone()).ok_or_else(incompatible)?;

    let mut out = Vec::with_capacity(va.len());
    for (&x, &y) in va.iter().zip(vb.iter()) {
        out.push(f(x, y)?);
    }
    Ok(ArrayD::from_shape_vec(shape, out)?)
}

/// Broadcasts three operands together and applies `f` element-wise.
pub fn try_zip3_with<S1, S2, S3, D1, D2, D3, T, F>(
    a: &ArrayBase<S1, D1>,
    b: &ArrayBase<S2, D2>,
    c: &ArrayBase<S3, D3>,
    mut f: F,
) -> RfResult<ArrayD<T>>
where
    S1: Data<Elem = Scalar>,
    S2: Data<Elem = Scalar>,
    S3: Data<Elem = Scalar>,
    D1: Dimension,
    D2: Dimension,
    D3: Dimension,
    F: FnMut(Scalar, Scalar, Scalar) -> RfResult<T>,
{
    let shape = broadcast_shape(&[a.shape(), b.shape(), c.shape()])?;
    let va = a.broadcast(shape.clone()).ok_or_else(incompatible)?;
    let vb = b.broadcast(shape.clone()).ok_or_else(incompatible)?;
    let vc = c.broadcast(shape.clone()).ok_or_else(incompatible)?;

    let mut out = Vec::with_capacity(va.len());
    for ((&x, &y), &z) in va.iter().zip(vb.iter()).zip(vc.iter()) {
        out.push(f(x, y, z)?);
    }
    Ok(ArrayD::from_shape_vec(shape, out)?)
}

/// Broadcasts four operands together and applies `f` element-wise.
pub fn try_zip4_with<S1, S2, S3, S4, D1, D2, D3, D4, T, F>(
    a: &ArrayBase<S1, D1>,
    b: &ArrayBase<S2, D2>,
    c: &ArrayBase<S3, D3>,
    d: &ArrayBase<S4, D4>,
    mut f: F,
) -> RfResult<ArrayD<T>>
where
    S1: Data<Elem = Scalar>,
    S2: Data<Elem = Scalar>,
    S3: Data<Elem = Scalar>,
    S4: Data<Elem = Scalar>,
    D1: Dimension,
    D2: Dimension,
    D3: Dimension,
    D4: Dimension,
    F: FnMut(Scalar, Scalar, Scalar, Scalar) -> RfResult<T>,
{
    let shape = broadcast_shape(&[a.shape(), b.shape(), c.shape(), d.shape()])?;
    let va = a.broadcast(shape.clone()).ok_or_else(incompatible)?;
    let vb = b.broadcast(shape.clone()).ok_or_else(incompatible)?;
    let vc = c.broadcast(shape.clone()).ok_or_else(incompatible)?;
    let vd = d.broadcast(shape.clone()).ok_or_else(incompatible)?;

    let mut out = Vec::with_capacity(va.len());
    let operands = va.iter().zip(vb.iter()).zip(vc.iter()).zip(vd.iter());
    for (((&w, &x), &y), &z) in operands {
        out.push(f(w, x, y, z)?);
    }
    Ok(ArrayD::from_shape_vec(shape, out)?)
}
