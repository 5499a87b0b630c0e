use std::{
    fmt::Write as _,
    fs::File,
    io::{self, BufRead, BufReader, IsTerminal, Write},
    path::PathBuf,
    str::FromStr,
};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use clinic::{
    Event, MedicineId, Outcome, Portal, Snapshot,
    domain::cart::CartLine,
    portal::Error as PortalError,
};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use super::{
    Context, doctors, medicines,
    terminal::{Colorize, is_narrow},
};

/// Run a sequence of portal events.
///
/// One event per line:
///
///   search-doctors <query>
///   search-medicines <query>
///   book <doctor> | <date> | <time> | <reason>
///   add <medicine id>
///   remove <medicine id>
///   checkout
///   cart
///   snapshot
///
/// Blank lines and lines starting with '#' are ignored.
#[derive(Debug, Parser)]
#[command(verbatim_doc_comment)]
pub struct Session {
    /// Read events from this file instead of stdin
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// How to report the result of each event
    #[arg(long, value_enum, default_value_t)]
    output: SessionFormat,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
enum SessionFormat {
    /// Human-readable messages
    #[default]
    Text,
    /// One JSON document per line
    Json,
}

/// A parsed session line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Event(Event),
    Cart,
    Snapshot,
}

#[derive(Debug, Error, PartialEq, Eq)]
enum ParseError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("'{0}' takes no arguments")]
    UnexpectedArgument(&'static str),
    #[error("book expects 'doctor | date | time | reason', got {0} field(s)")]
    BookingFields(usize),
}

impl FromStr for Line {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (verb, rest) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        let rest = rest.trim();

        let argument = |name: &'static str| {
            if rest.is_empty() {
                Err(ParseError::MissingArgument(name))
            } else {
                Ok(rest.to_string())
            }
        };
        let bare = |name: &'static str, line: Self| {
            if rest.is_empty() {
                Ok(line)
            } else {
                Err(ParseError::UnexpectedArgument(name))
            }
        };

        let event = match verb {
            // An empty search is valid: it clears the filter.
            "search-doctors" => Event::SearchDoctors(rest.to_string()),
            "search-medicines" => Event::SearchMedicines(rest.to_string()),
            "book" => {
                let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
                let [doctor, date, time, reason] = fields.as_slice() else {
                    return Err(ParseError::BookingFields(fields.len()));
                };
                Event::BookAppointment {
                    doctor: (*doctor).to_string(),
                    date: (*date).to_string(),
                    time: (*time).to_string(),
                    reason: (*reason).to_string(),
                }
            }
            "add" => Event::AddToCart(MedicineId::new(argument("add")?)),
            "remove" => Event::RemoveFromCart(MedicineId::new(argument("remove")?)),
            "checkout" => return bare("checkout", Self::Event(Event::Checkout)),
            "cart" => return bare("cart", Self::Cart),
            "snapshot" => return bare("snapshot", Self::Snapshot),
            other => return Err(ParseError::UnknownCommand(other.to_string())),
        };
        Ok(Self::Event(event))
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    line: usize,
    #[serde(flatten)]
    body: JsonBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum JsonBody<'a> {
    Outcome(&'a Outcome),
    Error { error: String },
    Cart { cart: &'a [CartLine], total: clinic::Rupees },
    Snapshot(&'a Snapshot),
}

impl Session {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let mut portal = context.portal()?;

        let (reader, interactive): (Box<dyn BufRead>, bool) = match &self.script {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open script {}", path.display()))?;
                (Box::new(BufReader::new(file)), false)
            }
            None => (Box::new(io::stdin().lock()), io::stdin().is_terminal()),
        };

        if interactive {
            prompt()?;
        }

        for (index, line) in reader.lines().enumerate() {
            let line = line.context("failed to read session input")?;
            let number = index + 1;
            let trimmed = line.trim();

            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                let report = match trimmed.parse::<Line>() {
                    Ok(parsed) => self.apply(&mut portal, number, parsed)?,
                    Err(error) => {
                        tracing::warn!("Skipping line {number}: {error}");
                        self.report_error(number, &format!("line {number}: {error}"))?
                    }
                };
                print!("{report}");
            }

            if interactive {
                prompt()?;
            }
        }

        Ok(())
    }

    fn apply(&self, portal: &mut Portal, number: usize, line: Line) -> anyhow::Result<String> {
        match line {
            Line::Event(Event::AddToCart(id)) => match unavailable(portal, &id) {
                Some(message) => self.report_error(number, &message),
                None => self.dispatch(portal, number, Event::AddToCart(id)),
            },
            Line::Event(event) => self.dispatch(portal, number, event),
            Line::Cart => match self.output {
                SessionFormat::Text => Ok(describe_cart(portal)),
                SessionFormat::Json => json_line(&JsonReport {
                    line: number,
                    body: JsonBody::Cart {
                        cart: portal.store().cart().lines(),
                        total: portal.store().cart_total(),
                    },
                }),
            },
            Line::Snapshot => {
                let snapshot = portal.snapshot();
                match self.output {
                    SessionFormat::Text => {
                        let mut out = String::new();
                        out.push_str(&doctors::render(&snapshot.doctors, is_narrow()));
                        out.push_str(&medicines::render(&snapshot.medicines));
                        out.push_str(&describe_cart(portal));
                        Ok(out)
                    }
                    SessionFormat::Json => json_line(&JsonReport {
                        line: number,
                        body: JsonBody::Snapshot(&snapshot),
                    }),
                }
            }
        }
    }

    fn dispatch(&self, portal: &mut Portal, number: usize, event: Event) -> anyhow::Result<String> {
        match portal.handle(event) {
            Ok(outcome) => match self.output {
                SessionFormat::Text => Ok(describe(portal, &outcome)),
                SessionFormat::Json => json_line(&JsonReport {
                    line: number,
                    body: JsonBody::Outcome(&outcome),
                }),
            },
            Err(error) => self.report_error(number, &error_message(&error)),
        }
    }

    fn report_error(&self, number: usize, message: &str) -> anyhow::Result<String> {
        match self.output {
            SessionFormat::Text => Ok(format!("{}\n", message.warning())),
            SessionFormat::Json => json_line(&JsonReport {
                line: number,
                body: JsonBody::Error {
                    error: message.to_string(),
                },
            }),
        }
    }
}

fn prompt() -> io::Result<()> {
    print!("{}", "> ".dim());
    io::stdout().flush()
}

fn json_line<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let mut line = serde_json::to_string(value).context("failed to render json output")?;
    line.push('\n');
    Ok(line)
}

/// The refusal for a medicine that is listed but out of stock.
fn unavailable(portal: &Portal, id: &MedicineId) -> Option<String> {
    portal
        .store()
        .medicine(id)
        .filter(|medicine| !medicine.is_available())
        .map(|medicine| format!("Unavailable: {} is out of stock.", medicine.name))
}

fn error_message(error: &PortalError) -> String {
    match error {
        PortalError::EmptyCart(_) => "Your cart is empty.".to_string(),
        PortalError::Validation(_) | PortalError::NotFound(_) => {
            let mut message = error.to_string();
            if let Some(first) = message.get(..1) {
                let upper = first.to_uppercase();
                message.replace_range(..1, &upper);
            }
            message
        }
    }
}

fn describe(portal: &Portal, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Doctors(doctors) if doctors.is_empty() => {
            format!("{}\n", "No doctors found.".dim())
        }
        Outcome::Doctors(doctors) => doctors::render(doctors, is_narrow()),
        Outcome::Medicines(medicines) if medicines.is_empty() => {
            format!("{}\n", "No medicines found.".dim())
        }
        Outcome::Medicines(medicines) => medicines::render(medicines),
        Outcome::Booked(appointment) => {
            format!("{}\n", format!("Booked {appointment}").success())
        }
        Outcome::Added(line) => format!(
            "{}\n{}",
            format!("Added {} to cart", line.name).success(),
            describe_cart(portal)
        ),
        Outcome::Removed(Some(line)) => {
            format!("Removed {} from cart\n{}", line.name, describe_cart(portal))
        }
        Outcome::Removed(None) => format!("{}\n", "Nothing to remove.".dim()),
        Outcome::CheckedOut(receipt) => format!(
            "{}\n{}\n",
            "Order placed (demo). Thank you!".success(),
            format!(
                "{} item(s), total {}, at {}",
                receipt.lines.len(),
                receipt.total,
                receipt.placed_at.format("%Y-%m-%d %H:%M:%S UTC")
            )
            .dim()
        ),
    }
}

fn describe_cart(portal: &Portal) -> String {
    let cart = portal.store().cart();
    let mut out = String::new();
    if cart.is_empty() {
        let _ = writeln!(out, "  {}", "Cart is empty".dim());
    }
    for line in cart.lines() {
        let _ = writeln!(out, "  {} × {}", line.name, line.qty);
    }
    let _ = writeln!(out, "Total: {}", portal.store().cart_total());
    out
}
