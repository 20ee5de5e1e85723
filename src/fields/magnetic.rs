use crate::math::Scalar;

/// Out-of-plane magnetic flux density `Bz` at height `y`.
///
/// The field is `b` above the strip (`y > 0`) and below it (`y < -h`), and zero
/// inside the field-free strip `-h ≤ y ≤ 0`. `h` is the effective strip
/// thickness.
#[inline]
#[must_use]
pub fn magnetic_field(y: Scalar, b: Scalar, h: Scalar) -> Scalar {
    if y > 0.0 || y < -h {
        b
    } else {
        0.0
    }
}
