use std::fmt::Write as _;

use clap::Parser;
use clinic::Portal;
use tracing::instrument;

use super::{Context, OutputFormat, table::print_json, terminal::Colorize};

#[derive(Debug, Parser, Default)]
#[command(about = "Show the patient dashboard")]
pub struct Dashboard {
    /// Output format (json emits the full portal snapshot)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Dashboard {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let portal = context.portal()?;

        match self.output {
            OutputFormat::Json => print_json(&portal.snapshot())?,
            OutputFormat::Table => print!("{}", render(&portal)),
        }
        Ok(())
    }
}

fn render(portal: &Portal) -> String {
    let store = portal.store();
    let mut out = String::new();

    section(&mut out, "Vitals", store.vitals());
    section(&mut out, "Appointments", store.appointments());
    section(&mut out, "Prescriptions", store.prescriptions());

    out
}

fn section<T: std::fmt::Display>(out: &mut String, title: &str, items: &[T]) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "{}", title.accent());
    if items.is_empty() {
        let _ = writeln!(out, "  {}", "none".dim());
    }
    for item in items {
        let _ = writeln!(out, "  {item}");
    }
}

#[cfg(test)]
mod tests {
    use clinic::{ChartLayout, Seed, Store};

    use super::*;

    #[test]
    fn dashboard_lists_every_section() {
        let rendered = render(&Portal::default());

        assert!(rendered.contains("09:00 • HR 78 bpm • BP 120 • SpO₂ 98%"));
        assert!(rendered.contains("2026-01-10 10:30 • Dr. Asha Reddy • Follow-up"));
        assert!(rendered.contains("Paracetamol 500mg — 1 tab x 3/day (Take after meals)"));
    }

    #[test]
    fn empty_sections_say_none() {
        let portal = Portal::new(Store::new(Seed::default()), ChartLayout::default());

        let rendered = render(&portal);

        assert_eq!(rendered.matches("none").count(), 3);
    }
}
