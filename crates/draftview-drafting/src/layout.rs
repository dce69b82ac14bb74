//! Preset positions for views placed on a new sheet.

use crate::types::NormalizedPosition;

const ONE: [NormalizedPosition; 1] = [NormalizedPosition::new(0.0, 0.35)];
const TWO: [NormalizedPosition; 2] = [
    NormalizedPosition::new(-0.6, 0.65),
    NormalizedPosition::new(0.6, 0.65),
];
const THREE: [NormalizedPosition; 3] = [
    NormalizedPosition::new(-0.85, 0.65),
    NormalizedPosition::new(-0.5, 0.65),
    NormalizedPosition::new(-0.85, 0.35),
];

/// Sheet positions for `view_count` views.
///
/// Counts without a preset use the single-view preset, and views past the
/// end of a preset reuse its first position. Overlap is accepted; placement
/// is advisory.
pub fn layout(view_count: usize) -> Vec<NormalizedPosition> {
    let preset: &[NormalizedPosition] = match view_count {
        2 => &TWO,
        3 => &THREE,
        _ => &ONE,
    };
    (0..view_count)
        .map(|n| preset.get(n).copied().unwrap_or(preset[0]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(layout(0).is_empty());
        assert_eq!(layout(1), vec![NormalizedPosition::new(0.0, 0.35)]);
        assert_eq!(layout(2), TWO.to_vec());
        assert_eq!(layout(3), THREE.to_vec());
    }

    #[test]
    fn test_overflow_reuses_first_position() {
        let positions = layout(4);
        assert_eq!(positions.len(), 4);
        assert!(positions.iter().all(|p| *p == ONE[0]));
    }
}
