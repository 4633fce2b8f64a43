//! Labor Force Pie Chart Module
//! Lays out the four labor-force categories of one neighborhood as a pie.

use crate::data::Feature;
use crate::format;
use egui::Color32;
use std::f64::consts::TAU;

pub const ARMED_FORCES: &str = "Armed Forces";
pub const EMPLOYED: &str = "Employed";
pub const UNEMPLOYED: &str = "Unemployed";
pub const NOT_IN_LABOR_FORCE: &str = "Not In Labor Force";

/// Slice palette, assigned to labels in order of first appearance.
pub const PALETTE: [Color32; 4] = [
    Color32::from_rgb(0x7b, 0x68, 0x88),
    Color32::from_rgb(0x6b, 0x48, 0x6b),
    Color32::from_rgb(0xa0, 0x5d, 0x56),
    Color32::from_rgb(0xd0, 0x74, 0x3c),
];

/// Gap between the container edge and the pie.
const OUTER_INSET: f64 = 10.0;
/// Distance of the label ring from the container edge.
const LABEL_INSET: f64 = 100.0;

/// Ordinal color scale: each new label takes the next palette color, cycling.
#[derive(Debug, Clone)]
pub struct OrdinalScale {
    domain: Vec<String>,
    range: Vec<Color32>,
}

impl OrdinalScale {
    pub fn new(range: &[Color32]) -> Self {
        Self {
            domain: Vec::new(),
            range: range.to_vec(),
        }
    }

    pub fn color(&mut self, label: &str) -> Color32 {
        let index = match self.domain.iter().position(|d| d == label) {
            Some(i) => i,
            None => {
                self.domain.push(label.to_string());
                self.domain.len() - 1
            }
        };
        self.range[index % self.range.len()]
    }
}

/// One laid-out slice. Angles are in radians, clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: Color32,
    /// Label anchor relative to the pie center, y pointing down.
    pub label_position: [f64; 2],
    pub text: String,
}

impl PieSlice {
    pub fn angle(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// A drawn chart. Square, `radius = width / 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub feature_index: usize,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub outer_radius: f64,
    pub label_radius: f64,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// Point on a circle of radius `r` at `angle`, y pointing down.
pub fn polar(r: f64, angle: f64) -> [f64; 2] {
    [r * angle.sin(), -r * angle.cos()]
}

/// Draws the labor-force pie for one feature.
pub struct ChartPresenter;

impl ChartPresenter {
    /// The four categories in display order.
    pub fn categories(feature: &Feature) -> [(&'static str, f64); 4] {
        let labor = &feature.labor;
        [
            (ARMED_FORCES, labor.armed_forces),
            (EMPLOYED, labor.employed),
            (UNEMPLOYED, labor.unemployed),
            (NOT_IN_LABOR_FORCE, labor.not_in_labor_force),
        ]
    }

    /// Lay out the pie for `feature` inside a container `width` wide.
    /// Slices keep category order; an all-zero feature yields zero-angle slices.
    pub fn draw(feature_index: usize, feature: &Feature, width: f64) -> PieChart {
        let width = width.max(0.0);
        let radius = width / 2.0;
        let outer_radius = (radius - OUTER_INSET).max(0.0);
        let label_radius = (radius - LABEL_INSET).max(radius / 2.0);

        let categories = Self::categories(feature);
        let sum: f64 = categories.iter().map(|&(_, v)| v.max(0.0)).sum();
        let k = if sum > 0.0 { TAU / sum } else { 0.0 };

        let mut colors = OrdinalScale::new(&PALETTE);
        let mut angle = 0.0;
        let slices = categories
            .iter()
            .map(|&(label, value)| {
                let start_angle = angle;
                angle += value.max(0.0) * k;
                let end_angle = angle;
                PieSlice {
                    label: label.to_string(),
                    value,
                    start_angle,
                    end_angle,
                    color: colors.color(label),
                    label_position: polar(label_radius, (start_angle + end_angle) / 2.0),
                    text: format!("{} ({})", label, format::with_thousands_separators(value)),
                }
            })
            .collect();

        PieChart {
            feature_index,
            width,
            height: width,
            radius,
            outer_radius,
            label_radius,
            slices,
        }
    }
}
