use std::collections::BTreeMap;

use plotters::prelude::*;
use thiserror::Error;

use crate::domain::simulation_mode::SimulationMode;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("histogram has no outcomes to draw")]
    EmptyHistogram,
    #[error("failed to render histogram: {0}")]
    Render(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartDimensions {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self {
            width: 3000,
            height: 2000,
        }
    }
}

/// One bar per distinct outcome, left to right by ascending outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Bar {
    position: i32,
    outcome: u64,
    frequency: usize,
}

fn layout_bars(histogram: &BTreeMap<u64, usize>) -> Vec<Bar> {
    histogram
        .iter()
        .enumerate()
        .map(|(position, (outcome, frequency))| Bar {
            position: position as i32,
            outcome: *outcome,
            frequency: *frequency,
        })
        .collect()
}

pub fn write_histogram_png(
    output_path: &str,
    histogram: &BTreeMap<u64, usize>,
    mode: SimulationMode,
    dimensions: ChartDimensions,
) -> Result<(), HistogramError> {
    let bars = layout_bars(histogram);
    if bars.is_empty() {
        return Err(HistogramError::EmptyHistogram);
    }
    render_histogram_png(output_path, &bars, mode, dimensions)
}

fn render_histogram_png(
    output_path: &str,
    bars: &[Bar],
    mode: SimulationMode,
    dimensions: ChartDimensions,
) -> Result<(), HistogramError> {
    let max_count = bars.iter().map(|bar| bar.frequency).max().unwrap_or(1);
    let bar_count = bars.len() as i32;
    let text_scale = (dimensions.height / 600).max(1);

    let root = BitMapBackend::new(output_path, (dimensions.width, dimensions.height))
        .into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20 * text_scale)
        .caption(
            "Monte Carlo Simulation Results",
            ("sans-serif", 30 * text_scale),
        )
        .x_label_area_size(55 * text_scale)
        .y_label_area_size(65 * text_scale)
        .build_cartesian_2d(0..bar_count, 0..(max_count + 1))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(bars.len().min(60))
        .x_desc(mode.outcome_label())
        .y_desc("Frequency")
        .label_style(("sans-serif", 18 * text_scale))
        .axis_desc_style(("sans-serif", 22 * text_scale))
        .x_label_formatter(&|position| {
            usize::try_from(*position)
                .ok()
                .and_then(|index| bars.get(index))
                .map(|bar| bar.outcome.to_string())
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled();
    chart
        .draw_series(bars.iter().map(|bar| {
            Rectangle::new(
                [(bar.position, 0), (bar.position + 1, bar.frequency)],
                bar_style,
            )
        }))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| HistogramError::Render(e.to_string()))?;
    Ok(())
}
