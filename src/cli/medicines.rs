use clap::Parser;
use clinic::Medicine;
use tracing::instrument;

use super::{
    Context, OutputFormat,
    table::{Table, print_json},
    terminal::Colorize,
};

#[derive(Debug, Parser)]
#[command(about = "List pharmacy medicines, optionally filtered by a search query")]
pub struct Medicines {
    /// Case-insensitive text to find in name or use
    #[arg(default_value = "")]
    query: String,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Medicines {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let mut portal = context.portal()?;
        portal.handle(clinic::Event::SearchMedicines(self.query.clone()))?;
        let medicines = portal.medicines();

        match self.output {
            OutputFormat::Json => print_json(&medicines)?,
            OutputFormat::Table => {
                if medicines.is_empty() {
                    println!(
                        "{}",
                        format!("No medicines match '{}'", self.query.trim()).dim()
                    );
                } else {
                    print!("{}", render(&medicines));
                }
            }
        }
        Ok(())
    }
}

/// Stock cell text: the count, or "Out of stock".
pub fn stock_label(medicine: &Medicine) -> String {
    if medicine.is_available() {
        medicine.stock.to_string()
    } else {
        "Out of stock".to_string()
    }
}

/// Whether the medicine can be ordered: "Available" or "Unavailable".
pub const fn availability_label(medicine: &Medicine) -> &'static str {
    if medicine.is_available() {
        "Available"
    } else {
        "Unavailable"
    }
}

pub fn render(medicines: &[Medicine]) -> String {
    let mut table = Table::new(vec!["ID", "Name", "Use", "Price", "Stock", "Order"]);
    for medicine in medicines {
        table.push(vec![
            medicine.id.to_string(),
            medicine.name.clone(),
            medicine.usage.clone(),
            medicine.price.to_string(),
            stock_label(medicine),
            availability_label(medicine).to_string(),
        ]);
    }
    table.render()
}

#[cfg(test)]
mod tests {
    use clinic::Seed;

    use super::*;

    #[test]
    fn renders_price_in_rupees() {
        let rendered = render(&Seed::demo().medicines);

        assert!(rendered.contains("₹25"));
        assert!(rendered.contains("Hydration support"));
        assert_eq!(rendered.lines().count(), 2 + 5);
    }

    #[test]
    fn empty_stock_is_labelled() {
        let mut medicine = Seed::demo().medicines.remove(0);
        medicine.stock = 0;

        assert_eq!(stock_label(&medicine), "Out of stock");
        assert_eq!(availability_label(&medicine), "Unavailable");
    }

    #[test]
    fn unavailable_row_is_marked_in_table() {
        let mut medicines = Seed::demo().medicines;
        medicines[1].stock = 0;

        let rendered = render(&medicines);
        let row = rendered
            .lines()
            .find(|line| line.contains("Amoxicillin"))
            .unwrap();

        assert!(row.contains("Unavailable"));
        assert_eq!(rendered.matches("Unavailable").count(), 1);
    }
}
