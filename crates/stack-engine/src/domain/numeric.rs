//! # Numeric Reductions
//!
//! Reductions and element-wise transforms over the numeric facet. Nothing here
//! needs the encrypted payload.

use super::errors::SequenceError;

/// Sum of all facets. Empty input sums to `0`.
pub fn sum(facets: &[f64]) -> f64 {
    facets.iter().sum()
}

/// Product of all facets. Empty input multiplies to `1`.
pub fn product(facets: &[f64]) -> f64 {
    facets.iter().product()
}

/// Arithmetic mean.
pub fn average(facets: &[f64]) -> Result<f64, SequenceError> {
    if facets.is_empty() {
        return Err(SequenceError::Empty);
    }
    Ok(sum(facets) / facets.len() as f64)
}

/// Population variance (divisor `n`).
pub fn variance(facets: &[f64]) -> Result<f64, SequenceError> {
    let mean = average(facets)?;
    let squared: f64 = facets.iter().map(|v| (v - mean).powi(2)).sum();
    Ok(squared / facets.len() as f64)
}

/// Square root of the population variance.
pub fn standard_deviation(facets: &[f64]) -> Result<f64, SequenceError> {
    variance(facets).map(f64::sqrt)
}

/// Median of a sorted copy; even lengths average the two middle values.
pub fn median(facets: &[f64]) -> Result<f64, SequenceError> {
    if facets.is_empty() {
        return Err(SequenceError::Empty);
    }
    let mut sorted = facets.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Smallest facet.
pub fn min(facets: &[f64]) -> Result<f64, SequenceError> {
    facets
        .iter()
        .copied()
        .min_by(f64::total_cmp)
        .ok_or(SequenceError::Empty)
}

/// Largest facet.
pub fn max(facets: &[f64]) -> Result<f64, SequenceError> {
    facets
        .iter()
        .copied()
        .max_by(f64::total_cmp)
        .ok_or(SequenceError::Empty)
}

/// `second mod top`, with the sign of `second`.
pub fn modulo(second: f64, top: f64) -> Result<f64, SequenceError> {
    if top == 0.0 {
        return Err(SequenceError::Invalid("modulo by zero".to_string()));
    }
    Ok(second % top)
}

/// Rescale every facet linearly onto `[0, 1]`.
pub fn normalize(facets: &[f64]) -> Result<Vec<f64>, SequenceError> {
    let lo = min(facets)
        .map_err(|_| SequenceError::Invalid("cannot normalize an empty stack".to_string()))?;
    let hi = max(facets)?;
    let span = hi - lo;
    if !(lo.is_finite() && hi.is_finite() && span.is_finite()) {
        return Err(SequenceError::Invalid(format!(
            "cannot normalize: range [{}, {}] is not finite",
            lo, hi
        )));
    }
    if span == 0.0 {
        return Err(SequenceError::Invalid(format!(
            "cannot normalize: all values equal {}",
            lo
        )));
    }
    Ok(facets.iter().map(|v| (v - lo) / span).collect())
}

/// Element-wise transform applied to every facet in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FacetTransform {
    /// `|v|`
    Absolute,
    /// `v ^ exponent`
    Power(f64),
    /// `e ^ v`
    Exponential,
    /// Round toward negative infinity.
    Floor,
    /// Round toward positive infinity.
    Ceiling,
    /// Round half away from zero.
    Round,
}

impl FacetTransform {
    /// Apply to a single facet.
    pub fn apply(self, v: f64) -> f64 {
        match self {
            FacetTransform::Absolute => v.abs(),
            FacetTransform::Power(exponent) => v.powf(exponent),
            FacetTransform::Exponential => v.exp(),
            FacetTransform::Floor => v.floor(),
            FacetTransform::Ceiling => v.ceil(),
            FacetTransform::Round => v.round(),
        }
    }

    /// Operation name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            FacetTransform::Absolute => "absolute_values",
            FacetTransform::Power(_) => "power_values",
            FacetTransform::Exponential => "exponential_values",
            FacetTransform::Floor => "floor_values",
            FacetTransform::Ceiling => "ceiling_values",
            FacetTransform::Round => "round_values",
        }
    }
}
