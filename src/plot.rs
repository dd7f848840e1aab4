use plotters::prelude::*;
use std::path::PathBuf;

use crate::state::MetricsState;

/// Renders the evolving metric streams as PNG panels in the output
/// directory, replaced wholesale after every completed pass.
///
/// Rendering is best-effort: the control loop logs failures and moves on.
pub struct MetricsPlotter {
    output_dir: PathBuf,
}

impl MetricsPlotter {
    pub fn new(output_dir: PathBuf) -> Self {
        MetricsPlotter { output_dir }
    }

    /// Redraw all panels from the current state of the run.
    pub fn render(&self, state: &MetricsState) -> Result<(), Box<dyn std::error::Error>> {
        self.plot_series(
            &state.read_count_history,
            &state.n50_history,
            "n50.png",
            "N50 values",
            "Reads",
            "N50",
            &RED,
        )?;
        self.plot_series(
            &state.read_count_history,
            &state.scaffold_count_history,
            "scaffolds.png",
            "Number of scaffolds",
            "Reads",
            "Scaffolds",
            &BLUE,
        )?;
        self.plot_contig_sizes(state)?;
        Ok(())
    }

    fn plot_series(
        &self,
        xs: &[u64],
        ys: &[u64],
        filename: &str,
        caption: &str,
        x_label: &str,
        y_label: &str,
        color: &RGBColor,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let path = self.output_dir.join(filename);
        let root = BitMapBackend::new(&path, (640, 480)).into_drawing_area();
        root.fill(&WHITE)?;

        let x_max = xs.iter().copied().max().unwrap_or(0).max(1);
        let y_max = ys.iter().copied().max().unwrap_or(0).max(1);

        let mut chart = ChartBuilder::on(&root)
            .caption(caption, ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0..x_max + 1, 0..y_max + y_max / 10 + 1)?;

        chart.configure_mesh().x_desc(x_label).y_desc(y_label).draw()?;

        let points: Vec<(u64, u64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        chart.draw_series(LineSeries::new(points.clone(), color))?;
        chart.draw_series(
            points.iter().map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
        )?;

        root.present()?;
        Ok(())
    }

    fn plot_contig_sizes(&self, state: &MetricsState) -> Result<(), Box<dyn std::error::Error>> {
        let path = self.output_dir.join("contigs.png");
        let root = BitMapBackend::new(&path, (640, 480)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut sizes: Vec<u64> = state.contig_sizes.values().copied().collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        let y_max = sizes.first().copied().unwrap_or(0).max(1);

        let mut chart = ChartBuilder::on(&root)
            .caption("Contig lengths", ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0..sizes.len().max(1), 0..y_max + y_max / 10)?;

        chart.configure_mesh().x_desc("Contig").y_desc("Length").draw()?;

        chart.draw_series(sizes.iter().enumerate().map(|(i, &len)| {
            Rectangle::new([(i, 0), (i + 1, len)], BLUE.mix(0.6).filled())
        }))?;

        root.present()?;
        Ok(())
    }
}
