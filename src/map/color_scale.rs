//! Choropleth Color Scale
//! Maps an unemployment-rate percentage to a fill color and opacity.

use egui::Color32;

/// Fill opacity of every non-zero polygon.
pub const FILL_OPACITY: f32 = 0.75;

/// Polygon outline style.
pub const STROKE_COLOR: Color32 = Color32::GRAY;
pub const STROKE_WEIGHT: f32 = 1.0;
pub const STROKE_OPACITY: f32 = 0.25;

/// Buckets from darkest to lightest: (exclusive lower bound, color).
/// The last bucket catches everything at or below 2%.
pub const BUCKETS: [(f64, Color32); 6] = [
    (10.0, Color32::from_rgb(0x99, 0x34, 0x04)),
    (8.0, Color32::from_rgb(0xd9, 0x5f, 0x0e)),
    (6.0, Color32::from_rgb(0xfe, 0x99, 0x29)),
    (4.0, Color32::from_rgb(0xfe, 0xc4, 0x4f)),
    (2.0, Color32::from_rgb(0xfe, 0xe3, 0x91)),
    (f64::NEG_INFINITY, Color32::from_rgb(0xff, 0xff, 0xd4)),
];

/// Legend thresholds in percent.
pub const LEGEND_AMOUNTS: [u32; 6] = [0, 2, 4, 6, 8, 10];

/// Index into `BUCKETS` for a percentage: 0 is darkest.
/// Tested from the highest threshold down; first strict match wins.
pub fn bucket_index(pct: f64) -> usize {
    BUCKETS
        .iter()
        .position(|&(threshold, _)| pct > threshold)
        .unwrap_or(BUCKETS.len() - 1)
}

pub fn fill_color(pct: f64) -> Color32 {
    BUCKETS[bucket_index(pct)].1
}

/// Exactly 0% is hidden; the color bucket is unaffected.
pub fn fill_opacity(pct: f64) -> f32 {
    if pct == 0.0 {
        0.0
    } else {
        FILL_OPACITY
    }
}

/// Resolved polygon style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonStyle {
    pub fill_color: Color32,
    pub fill_opacity: f32,
    pub stroke_color: Color32,
    pub stroke_weight: f32,
    pub stroke_opacity: f32,
}

impl PolygonStyle {
    pub fn for_percentage(pct: f64) -> Self {
        Self {
            fill_color: fill_color(pct),
            fill_opacity: fill_opacity(pct),
            stroke_color: STROKE_COLOR,
            stroke_weight: STROKE_WEIGHT,
            stroke_opacity: STROKE_OPACITY,
        }
    }

    /// Fill with the opacity applied, ready for painting.
    pub fn fill(&self) -> Color32 {
        self.fill_color.gamma_multiply(self.fill_opacity)
    }

    pub fn stroke(&self) -> egui::Stroke {
        egui::Stroke::new(
            self.stroke_weight,
            self.stroke_color.gamma_multiply(self.stroke_opacity),
        )
    }
}

/// One legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub color: Color32,
    pub label: String,
}

/// Static six-entry legend. Each swatch samples the scale one point above
/// its threshold.
pub fn legend() -> Vec<LegendEntry> {
    LEGEND_AMOUNTS
        .iter()
        .enumerate()
        .map(|(i, &amount)| {
            let label = match LEGEND_AMOUNTS.get(i + 1) {
                Some(next) => format!("{}% – {}%", amount, next),
                None => format!("{}% +", amount),
            };
            LegendEntry {
                color: fill_color(f64::from(amount) + 1.0),
                label,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(15.0, 0)]
    #[case(10.0001, 0)]
    #[case(10.0, 1)]
    #[case(8.5, 1)]
    #[case(8.0, 2)]
    #[case(7.2, 2)]
    #[case(6.0, 3)]
    #[case(4.0, 4)]
    #[case(2.5, 4)]
    #[case(2.0, 5)]
    #[case(0.0, 5)]
    fn test_bucket_boundaries_are_strict(#[case] pct: f64, #[case] expected: usize) {
        assert_eq!(bucket_index(pct), expected);
    }

    #[test]
    fn test_darkness_non_increasing_as_pct_decreases() {
        let mut previous = bucket_index(100.0);
        let mut pct = 100.0;
        while pct >= 0.0 {
            let current = bucket_index(pct);
            assert!(current >= previous, "bucket got darker at {}", pct);
            previous = current;
            pct -= 0.05;
        }
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(0.01, FILL_OPACITY)]
    #[case(1.5, FILL_OPACITY)]
    #[case(12.0, FILL_OPACITY)]
    fn test_opacity_zero_only_at_zero(#[case] pct: f64, #[case] expected: f32) {
        assert_eq!(fill_opacity(pct), expected);
    }

    #[test]
    fn test_zero_keeps_bucket_color() {
        let style = PolygonStyle::for_percentage(0.0);
        assert_eq!(style.fill_color, BUCKETS[5].1);
        assert_eq!(style.fill_opacity, 0.0);
    }

    #[test]
    fn test_legend() {
        let entries = legend();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].label, "0% – 2%");
        assert_eq!(entries[4].label, "8% – 10%");
        assert_eq!(entries[5].label, "10% +");

        let colors: Vec<Color32> = entries.iter().map(|e| e.color).collect();
        let expected: Vec<Color32> = BUCKETS.iter().rev().map(|&(_, c)| c).collect();
        assert_eq!(colors, expected);
    }
}
