//! @ai:module:intent Per-category chart for scorecards
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartGenerator, ChartGeneratorTrait
//! @ai:module:stateless true

use crate::metrics::Scorecard;
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

pub const CATEGORY_CHART: &str = "by_category.png";

/// @ai:intent Trait for chart generation
pub trait ChartGeneratorTrait: Send + Sync {
    /// @ai:intent Generate all charts, returning the file names written
    fn generate_all(&self, scorecard: &Scorecard, output_dir: &Path) -> Result<Vec<String>>;
}

/// @ai:intent Draws recall and correction accuracy per error category
pub struct ChartGenerator;

impl ChartGenerator {
    /// @ai:intent Create a new chart generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Grouped bar chart, two bars per category
    /// @ai:post returns false and writes nothing when there are no categories
    /// @ai:effects fs:write
    pub fn category_chart(&self, scorecard: &Scorecard, output_path: &Path) -> Result<bool> {
        if scorecard.report.per_category.is_empty() {
            tracing::debug!("No categories to chart");
            return Ok(false);
        }

        let data: Vec<_> = scorecard
            .report
            .per_category
            .iter()
            .map(|(name, stats)| {
                (
                    name.as_str(),
                    stats.recall * 100.0,
                    stats.correction_accuracy * 100.0,
                )
            })
            .collect();

        let width = (160 * data.len() as u32).clamp(800, 2400);
        let root = BitMapBackend::new(output_path, (width, 500)).into_drawing_area();
        root.fill(&WHITE)?;

        let caption = match &scorecard.metadata {
            Some(meta) => format!("Per-category results: {}", meta.model),
            None => "Per-category results".to_string(),
        };

        // each category spans three slots: recall, accuracy, gap
        let slots = data.len() as i32 * 3;

        let mut chart = ChartBuilder::on(&root)
            .caption(caption, ("sans-serif", 25))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0..slots, 0f64..100f64)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(slots as usize)
            .y_desc("Rate (%)")
            .x_label_formatter(&|x| {
                if x % 3 != 0 {
                    return String::new();
                }
                data.get((*x / 3) as usize)
                    .map(|(name, _, _)| name.to_string())
                    .unwrap_or_default()
            })
            .draw()?;

        chart
            .draw_series(data.iter().enumerate().map(|(i, (_, recall, _))| {
                let x = i as i32 * 3;
                Rectangle::new([(x, 0.0), (x + 1, *recall)], BLUE.mix(0.7).filled())
            }))?
            .label("Recall")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], BLUE.mix(0.7).filled()));

        chart
            .draw_series(data.iter().enumerate().map(|(i, (_, _, accuracy))| {
                let x = i as i32 * 3 + 1;
                Rectangle::new([(x, 0.0), (x + 1, *accuracy)], GREEN.mix(0.7).filled())
            }))?
            .label("Correction accuracy")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], GREEN.mix(0.7).filled()));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(true)
    }
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartGeneratorTrait for ChartGenerator {
    /// @ai:effects fs:write
    fn generate_all(&self, scorecard: &Scorecard, output_dir: &Path) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;

        let mut generated = Vec::new();
        if self.category_chart(scorecard, &output_dir.join(CATEGORY_CHART))? {
            generated.push(CATEGORY_CHART.to_string());
        }

        Ok(generated)
    }
}
