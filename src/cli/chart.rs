use std::{fmt::Write as _, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use clinic::ChartProjection;
use tracing::instrument;

use super::{
    Context,
    table::{Table, print_json},
    terminal::Colorize,
};

#[derive(Debug, Parser)]
#[command(about = "Draw the vitals chart")]
pub struct Chart {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: ChartFormat,

    /// Write to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
enum ChartFormat {
    /// Projected coordinates, one row per reading
    #[default]
    Table,
    /// The full projection, including axes and legend
    Json,
    /// A standalone SVG image
    Svg,
}

impl Chart {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let portal = context.portal()?;
        let Some(projection) = portal.chart() else {
            println!("{}", "No vitals recorded yet.".dim());
            return Ok(());
        };

        let rendered = match self.output {
            ChartFormat::Table => render_table(&projection),
            ChartFormat::Svg => render_svg(&projection),
            ChartFormat::Json => {
                if self.out.is_none() {
                    return print_json(&projection);
                }
                serde_json::to_string_pretty(&projection).context("failed to render json")?
            }
        };

        match &self.out {
            Some(path) => {
                std::fs::write(path, rendered)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!("Wrote chart to {}", path.display());
                println!("{}", format!("Chart written to {}", path.display()).success());
            }
            None => print!("{rendered}"),
        }
        Ok(())
    }
}

fn render_table(projection: &ChartProjection) -> String {
    let [hr, bp] = &projection.series;
    let mut table = Table::new(vec!["Time", "x", "Heart Rate y", "Systolic BP y"]);

    for (index, label) in projection.labels.iter().enumerate() {
        table.push(vec![
            label.clone(),
            format!("{:.1}", hr.points[index].x),
            format!("{:.1}", hr.points[index].y),
            format!("{:.1}", bp.points[index].y),
        ]);
    }

    let mut out = table.render();
    for series in [hr, bp] {
        let _ = writeln!(
            out,
            "{}: scaled over [{}, {}]",
            series.legend.label, series.min, series.max
        );
    }
    out
}

fn render_svg(projection: &ChartProjection) -> String {
    let layout = &projection.layout;
    let mut svg = String::new();

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = layout.width,
        h = layout.height,
    );
    let _ = writeln!(svg, r##"  <rect width="100%" height="100%" fill="#0b1220"/>"##);
    let _ = writeln!(
        svg,
        r#"  <polyline points="{}" fill="none" stroke="rgba(255,255,255,0.2)" stroke-width="1"/>"#,
        points(projection.axes.iter())
    );

    for series in &projection.series {
        if series.is_line() {
            let _ = writeln!(
                svg,
                r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                points(series.points.iter()),
                series.color,
                series.line_width
            );
        } else {
            for point in &series.points {
                let _ = writeln!(
                    svg,
                    r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                    point.x, point.y, series.line_width, series.color
                );
            }
        }

        let legend = &series.legend;
        let _ = writeln!(
            svg,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            legend.swatch.origin.x,
            legend.swatch.origin.y,
            legend.swatch.width,
            legend.swatch.height,
            series.color
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{}" y="{}" font-family="system-ui" font-size="12" fill="rgba(255,255,255,0.85)">{}</text>"#,
            legend.label_at.x, legend.label_at.y, legend.label
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn points<'a>(points: impl Iterator<Item = &'a clinic::domain::chart::Point>) -> String {
    points
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use clinic::{Portal, Seed, Store, domain::chart::ChartLayout};

    use super::*;

    fn demo_projection() -> ChartProjection {
        Portal::default().chart().unwrap()
    }

    #[test]
    fn table_has_a_row_per_reading() {
        let rendered = render_table(&demo_projection());

        // header, rule, five readings, two range lines
        assert_eq!(rendered.lines().count(), 9);
        assert!(rendered.contains("Heart Rate: scaled over [69, 87]"));
        assert!(rendered.contains("Systolic BP: scaled over [110, 125]"));
    }

    #[test]
    fn svg_draws_axes_lines_and_legend() {
        let svg = render_svg(&demo_projection());

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"points="40.00,20.00 40.00,230.00 620.00,230.00""#));
        assert_eq!(svg.matches("<polyline").count(), 3);
        assert!(svg.contains("#4f7df3"));
        assert!(svg.contains(">Systolic BP</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn single_reading_is_drawn_as_dots() {
        let mut seed = Seed::demo();
        seed.patient.vitals.truncate(1);
        let portal = Portal::new(Store::new(seed), ChartLayout::default());

        let svg = render_svg(&portal.chart().unwrap());

        assert_eq!(svg.matches("<circle").count(), 2);
        assert_eq!(svg.matches("<polyline").count(), 1);
    }
}
