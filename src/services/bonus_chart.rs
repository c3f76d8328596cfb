use std::collections::BTreeMap;

use plotters::prelude::*;
use thiserror::Error;

use crate::domain::history::StoredResult;

#[derive(Error, Debug)]
pub enum BonusChartError {
    #[error("history has no named agents to plot")]
    NoAgents,
    #[error("failed to render bonus chart: {0}")]
    Plot(String),
}

/// Sums the stored bonuses per named agent, ordered by name.
pub fn bonus_totals_by_agent(results: &[StoredResult]) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for result in results.iter().filter(|r| r.has_agent_name()) {
        *totals.entry(result.agent_name.as_str()).or_insert(0.0) += result.bonus;
    }
    totals
        .into_iter()
        .map(|(name, total)| (name.to_string(), total))
        .collect()
}

pub fn write_bonus_chart_png(output_path: &str, results: &[StoredResult]) -> Result<(), BonusChartError> {
    let totals = bonus_totals_by_agent(results);
    if totals.is_empty() {
        return Err(BonusChartError::NoAgents);
    }
    render_bonus_chart_png(output_path, &totals)
}

fn render_bonus_chart_png(output_path: &str, totals: &[(String, f64)]) -> Result<(), BonusChartError> {
    let max_bonus = totals.iter().map(|(_, total)| *total).fold(0.0_f64, f64::max);
    let max_y = (max_bonus * 1.1).max(1.0);
    let max_x = totals.len() as i32;

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| BonusChartError::Plot(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Total Bonus per Agent", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(75)
        .build_cartesian_2d(0..max_x, 0.0..max_y)
        .map_err(|e| BonusChartError::Plot(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Agent")
        .y_desc("Bonus (EUR)")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_labels(totals.len().min(12).max(1))
        .x_label_formatter(&|index| {
            if *index < 0 {
                return String::new();
            }
            totals
                .get(*index as usize)
                .map(|(name, _)| name.clone())
                .unwrap_or_default()
        })
        .y_label_formatter(&|value| format!("{value:.0}"))
        .draw()
        .map_err(|e| BonusChartError::Plot(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled().stroke_width(1);
    chart
        .draw_series(totals.iter().enumerate().map(|(idx, (_, total))| {
            Rectangle::new([(idx as i32, 0.0), (idx as i32 + 1, *total)], bar_style)
        }))
        .map_err(|e| BonusChartError::Plot(e.to_string()))?;

    root.present()
        .map_err(|e| BonusChartError::Plot(e.to_string()))?;
    Ok(())
}
