use crate::error::{HfaError, Result};
use crate::reference::ReferenceRow;

/// LMS z-score of a height against a reference row.
///
/// - `L == 0`: `ln(h / M) / S`
/// - otherwise: `((h / M)^L - 1) / (L * S)`
///
/// Fails with [`HfaError::Domain`] instead of returning NaN or infinity.
pub fn compute_score(height_cm: f64, row: &ReferenceRow) -> Result<f64> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(HfaError::Domain(format!("height must be positive, got {height_cm}")));
    }
    if !row.m.is_finite() || row.m <= 0.0 {
        return Err(HfaError::Domain(format!(
            "median M must be positive, got {} at {} months",
            row.m, row.age_months
        )));
    }
    if !row.s.is_finite() || row.s <= 0.0 {
        return Err(HfaError::Domain(format!(
            "scale S must be positive, got {} at {} months",
            row.s, row.age_months
        )));
    }
    if !row.l.is_finite() {
        return Err(HfaError::Domain(format!("power L is not finite at {} months", row.age_months)));
    }
    let ratio = height_cm / row.m;
    let z = if row.l == 0.0 {
        ratio.ln() / row.s
    } else {
        (ratio.powf(row.l) - 1.0) / (row.l * row.s)
    };
    if !z.is_finite() {
        return Err(HfaError::Domain(format!(
            "z-score overflowed for height {height_cm} at {} months",
            row.age_months
        )));
    }
    Ok(z)
}
