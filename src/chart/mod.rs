// src/chart/mod.rs
use eframe::egui::{self, Color32};
use thiserror::Error;

use crate::model::{LogPoint, ProcessMapping};

pub const NORMAL_COLOR: Color32 = Color32::from_rgb(59, 130, 246);
pub const ANOMALY_COLOR: Color32 = Color32::from_rgb(239, 68, 68);

// Hover tolerance as a fraction of the visible axis range.
const HOVER_FRACTION: f64 = 0.025;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("label count {labels} does not match point count {points}")]
    LengthMismatch { labels: usize, points: usize },
}

/// One plotted point with everything it needs, merged into a single record
/// so the raw log text and the anomaly flag can never drift out of index
/// alignment with the coordinates.
#[derive(Debug, Clone)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub original_log: String,
    pub anomalous: bool,
}

/// The single live chart. Recreated wholesale on every data load, mutated in
/// place (anomaly flags, legend text) when analysis results arrive.
#[derive(Debug)]
pub struct ChartView {
    points: Vec<ChartPoint>,
    mapping: ProcessMapping,
    labeled: bool,
}

impl ChartView {
    pub fn new(data: &[LogPoint], mapping: ProcessMapping) -> Self {
        let points = data
            .iter()
            .map(|p| ChartPoint {
                x: p.x,
                y: p.y,
                original_log: p.original_log.clone(),
                anomalous: false,
            })
            .collect();

        Self {
            points,
            mapping,
            labeled: false,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    /// Raw log text for the point at `index`, as shown in the tooltip.
    pub fn original_log_at(&self, index: usize) -> Option<&str> {
        self.points.get(index).map(|p| p.original_log.as_str())
    }

    /// Apply per-point anomaly labels (1 = anomaly, 0 = normal).
    ///
    /// Labels must cover every point exactly; a mismatched vector is
    /// rejected without touching the chart.
    pub fn apply_anomaly_labels(&mut self, labels: &[u8]) -> Result<(), ChartError> {
        if labels.len() != self.points.len() {
            return Err(ChartError::LengthMismatch {
                labels: labels.len(),
                points: self.points.len(),
            });
        }

        for (point, label) in self.points.iter_mut().zip(labels) {
            point.anomalous = *label == 1;
        }
        self.labeled = true;
        Ok(())
    }

    /// Y-axis tick text: process name for integer ids, raw id if unmapped,
    /// nothing for fractional grid positions (the axis is categorical).
    pub fn tick_label(&self, value: f64) -> String {
        tick_label(&self.mapping, value)
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let mapping = self.mapping.clone();

        let normal: Vec<[f64; 2]> = self
            .points
            .iter()
            .filter(|p| !p.anomalous)
            .map(|p| [p.x, p.y])
            .collect();
        let anomalies: Vec<[f64; 2]> = self
            .points
            .iter()
            .filter(|p| p.anomalous)
            .map(|p| [p.x, p.y])
            .collect();

        let plot = egui_plot::Plot::new("log_chart")
            .legend(egui_plot::Legend::default())
            .x_axis_label("Hour of Day (0-24)")
            .y_axis_label("Process Name")
            .y_axis_formatter(move |value, _max_chars, _range| tick_label(&mapping, value));

        let inner = plot.show(ui, |plot_ui| {
            let normal_name = if self.labeled { "Normal" } else { "Log Entries" };
            plot_ui.points(
                egui_plot::Points::new(normal)
                    .name(normal_name)
                    .color(NORMAL_COLOR)
                    .filled(true)
                    .radius(4.0),
            );
            if !anomalies.is_empty() {
                plot_ui.points(
                    egui_plot::Points::new(anomalies)
                        .name("Anomaly")
                        .color(ANOMALY_COLOR)
                        .filled(true)
                        .radius(4.0),
                );
            }
            (plot_ui.pointer_coordinate(), plot_ui.plot_bounds())
        });

        // Tooltip: resolve the raw log line through the hovered point's
        // positional index into the merged records.
        let (pointer, bounds) = inner.inner;
        if let Some(coord) = pointer {
            let max_dx = bounds.width() * HOVER_FRACTION;
            let max_dy = bounds.height() * HOVER_FRACTION;
            if let Some(index) = self.nearest_point(coord.x, coord.y, max_dx, max_dy) {
                egui::show_tooltip_at_pointer(ui.ctx(), egui::Id::new("log_tooltip"), |ui| {
                    ui.label(&self.points[index].original_log);
                });
            }
        }
    }

    /// Index of the point closest to (x, y), if any lies within the given
    /// per-axis tolerances.
    fn nearest_point(&self, x: f64, y: f64, max_dx: f64, max_dy: f64) -> Option<usize> {
        if max_dx <= 0.0 || max_dy <= 0.0 {
            return None;
        }

        let mut best: Option<(usize, f64)> = None;
        for (i, point) in self.points.iter().enumerate() {
            let dx = (point.x - x) / max_dx;
            let dy = (point.y - y) / max_dy;
            let dist = dx * dx + dy * dy;
            if dist <= 1.0 && best.map_or(true, |(_, d)| dist < d) {
                best = Some((i, dist));
            }
        }
        best.map(|(i, _)| i)
    }
}

fn tick_label(mapping: &ProcessMapping, value: f64) -> String {
    let id = value.round() as i64;
    if (value - id as f64).abs() > 1e-6 {
        return String::new();
    }
    match mapping.get(&id) {
        Some(name) => name.clone(),
        None => id.to_string(),
    }
}
