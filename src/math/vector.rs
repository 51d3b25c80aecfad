#[must_use]
#[inline]
pub fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).fold(0.0, |dot, (xi, yi)| dot + xi * yi)
}

/// Adds `y` to `x` element-wise.
#[inline]
pub fn add_assign(x: &mut [f64], y: &[f64]) {
    for (xi, yi) in x.iter_mut().zip(y) {
        *xi += yi;
    }
}

#[inline]
pub fn div_assign(x: &mut [f64], denominator: f64) {
    for xi in x {
        *xi /= denominator;
    }
}
