use clap::Parser;
use clinic::Doctor;
use tracing::instrument;

use super::{
    Context, OutputFormat,
    table::{Table, print_json},
    terminal::{Colorize, is_narrow},
};

#[derive(Debug, Parser)]
#[command(about = "List doctors, optionally filtered by a search query")]
pub struct Doctors {
    /// Case-insensitive text to find in name, specialty or location
    #[arg(default_value = "")]
    query: String,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Doctors {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let mut portal = context.portal()?;
        portal.handle(clinic::Event::SearchDoctors(self.query.clone()))?;
        let doctors = portal.doctors();

        match self.output {
            OutputFormat::Json => print_json(&doctors)?,
            OutputFormat::Table => {
                if doctors.is_empty() {
                    println!("{}", format!("No doctors match '{}'", self.query.trim()).dim());
                } else {
                    print!("{}", render(&doctors, is_narrow()));
                }
            }
        }
        Ok(())
    }
}

pub fn render(doctors: &[Doctor], narrow: bool) -> String {
    let mut table = if narrow {
        Table::new(vec!["Name", "Specialty", "Next available"])
    } else {
        Table::new(vec!["ID", "Name", "Specialty", "Location", "Rating", "Next available"])
    };

    for doctor in doctors {
        let row = if narrow {
            vec![
                doctor.name.clone(),
                doctor.specialty.clone(),
                doctor.next_available.clone(),
            ]
        } else {
            vec![
                doctor.id.to_string(),
                doctor.name.clone(),
                doctor.specialty.clone(),
                doctor.location.clone(),
                format!("{} ★", doctor.rating),
                doctor.next_available.clone(),
            ]
        };
        table.push(row);
    }

    table.render()
}
