use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use lounge_desk::{document_id, Config, FareRequest, NameRule, ParsedBadge, PaymentType, RateCard};

#[derive(Parser)]
#[command(name = "lounge-desk", version, about = "Lounge front-desk badge tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse badge scans (arguments, --file, or stdin; one scan per line)
    Parse {
        scans: Vec<String>,

        #[arg(long)]
        file: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Overrides LOUNGE_NAME_RULE
        #[arg(long, value_enum)]
        name_rule: Option<NameRuleArg>,

        /// Overrides LOUNGE_CARRIERS_FILE
        #[arg(long)]
        carriers: Option<PathBuf>,
    },

    /// Quote a walk-in fare from a rate card
    Quote {
        #[arg(long)]
        rates: PathBuf,

        #[arg(long, default_value_t = 1)]
        adults: u32,

        #[arg(long, default_value_t = 0)]
        kids: u32,

        #[arg(long, default_value = "A")]
        rate_type: String,

        #[arg(long, default_value = "USD")]
        currency: String,

        #[arg(long, value_enum, default_value_t = PaymentArg::Cash)]
        payment: PaymentArg,

        #[arg(long, default_value_t = 0.0)]
        paid: f64,
    },

    /// Print the check-in document key for a name and flight
    DocumentId { name: String, flight_no: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

#[derive(Clone, Copy, ValueEnum)]
enum NameRuleArg {
    Span,
    FirstToken,
}

impl From<NameRuleArg> for NameRule {
    fn from(arg: NameRuleArg) -> Self {
        match arg {
            NameRuleArg::Span => NameRule::SpanBeforeMle,
            NameRuleArg::FirstToken => NameRule::FirstToken,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PaymentArg {
    Cash,
    Card,
}

impl From<PaymentArg> for PaymentType {
    fn from(arg: PaymentArg) -> Self {
        match arg {
            PaymentArg::Cash => PaymentType::Cash,
            PaymentArg::Card => PaymentType::Card,
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Parse { scans, file, format, name_rule, carriers } => {
            run_parse(scans, file, format, name_rule, carriers)
        }
        Command::Quote { rates, adults, kids, rate_type, currency, payment, paid } => {
            let request = FareRequest {
                adults,
                kids,
                rate_type,
                currency,
                payment: payment.into(),
                paid,
            };
            run_quote(rates, &request)
        }
        Command::DocumentId { name, flight_no } => {
            let id = document_id(&name, &flight_no)
                .context("Name and flight number are required for document ID")?;
            println!("{}", id);
            Ok(())
        }
    }
}

fn run_parse(
    scans: Vec<String>,
    file: Option<PathBuf>,
    format: Format,
    name_rule: Option<NameRuleArg>,
    carriers: Option<PathBuf>,
) -> Result<()> {
    let mut config = Config::load();
    if let Some(rule) = name_rule {
        config.name_rule = rule.into();
    }
    if carriers.is_some() {
        config.carriers_file = carriers;
    }
    let reader = config.reader()?;

    let lines = read_scans(scans, file)?;
    let badges = reader.read_all(lines.iter().map(String::as_str));
    tracing::info!(count = badges.len(), "Parsed badge scans");

    let stdout = io::stdout();
    match format {
        Format::Json => write_json(stdout.lock(), &badges),
        Format::Csv => write_csv(stdout.lock(), &badges),
    }
}

fn read_scans(scans: Vec<String>, file: Option<PathBuf>) -> Result<Vec<String>> {
    if !scans.is_empty() {
        return Ok(scans);
    }

    if let Some(path) = file {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scans file: {}", path.display()))?;
        return Ok(content.lines().map(str::to_string).collect());
    }

    io::stdin()
        .lock()
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .context("Failed to read scans from stdin")
}

fn write_json<W: Write>(mut out: W, badges: &[ParsedBadge]) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, badges).context("Failed to write JSON")?;
    writeln!(out)?;
    Ok(())
}

fn write_csv<W: Write>(out: W, badges: &[ParsedBadge]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for badge in badges {
        writer.serialize(badge).context("Failed to write CSV row")?;
    }
    writer.flush()?;
    Ok(())
}

fn run_quote(rates: PathBuf, request: &FareRequest) -> Result<()> {
    let card = RateCard::from_file(&rates)?;
    let quote = card.quote(request).with_context(|| {
        format!(
            "Rate card has no Adult/Kids rate for {}{}",
            request.rate_type, request.currency
        )
    })?;

    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}
