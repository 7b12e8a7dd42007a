//! Section status derivation and weighted overall score
//!
//! Status is recomputed from scratch on every run; nothing here remembers a
//! previous run.

use shared::models::{SectionStatus, ValidationResult};

/// Errors take priority over the score
pub fn derive_status(result: &ValidationResult) -> SectionStatus {
    if result.has_errors() {
        return SectionStatus::Error;
    }
    match result.completion_percentage {
        0 => SectionStatus::Pending,
        100.. => SectionStatus::Completed,
        _ => SectionStatus::InProgress,
    }
}

/// `round(100 × Σ(wᵢ × pctᵢ / 100) / Σ(wᵢ))` over `(weight, percentage)` pairs
///
/// 0 when there are no sections or every weight is 0. Percentages are
/// clamped to 0–100 so the result always stays in range.
pub fn overall_progress(sections: &[(u32, i32)]) -> i32 {
    let total_weight: u64 = sections.iter().map(|(w, _)| u64::from(*w)).sum();
    if total_weight == 0 {
        return 0;
    }
    let weighted: f64 = sections
        .iter()
        .map(|(w, pct)| f64::from(*w) * f64::from((*pct).clamp(0, 100)) / 100.0)
        .sum();
    let progress = (100.0 * weighted / total_weight as f64).round();
    progress.clamp(0.0, 100.0) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(pct: u8, errors: usize) -> ValidationResult {
        ValidationResult {
            completion_percentage: pct,
            errors: (0..errors).map(|i| format!("error {i}")).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_derive_status() {
        assert_eq!(derive_status(&result(0, 0)), SectionStatus::Pending);
        assert_eq!(derive_status(&result(1, 0)), SectionStatus::InProgress);
        assert_eq!(derive_status(&result(99, 0)), SectionStatus::InProgress);
        assert_eq!(derive_status(&result(100, 0)), SectionStatus::Completed);
    }

    #[test]
    fn test_errors_override_full_completion() {
        assert_eq!(derive_status(&result(100, 1)), SectionStatus::Error);
        assert_eq!(derive_status(&result(0, 2)), SectionStatus::Error);
    }

    #[test]
    fn test_weighted_progress() {
        assert_eq!(overall_progress(&[(15, 100), (5, 0)]), 75);
        assert_eq!(overall_progress(&[(10, 50), (10, 100)]), 75);
        assert_eq!(overall_progress(&[(1, 40), (1, 60)]), 50);
    }

    #[test]
    fn test_degenerate_inputs_stay_in_bounds() {
        assert_eq!(overall_progress(&[]), 0);
        assert_eq!(overall_progress(&[(0, 100), (0, 50)]), 0);
        assert_eq!(overall_progress(&[(u32::MAX, 100), (u32::MAX, 100)]), 100);
        assert_eq!(overall_progress(&[(3, 250)]), 100);
        assert_eq!(overall_progress(&[(3, -20)]), 0);
    }
}
