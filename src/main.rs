mod cli;
mod config;
mod counter;
mod date;
mod issuer;
mod macros;
mod model;
mod state;
mod template;

use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use log::{debug, info};
use model::{CustomerId, TemplateName};
use template::formatter;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(bin_name = env!("CARGO_BIN_NAME"))]
enum Cli {
    #[command(about = "Prints tool version")]
    #[command(long_about = None)]
    Version,

    #[command(about = "Prints the next number without issuing it")]
    #[command(long_about = None)]
    Format(NumberArgs),

    #[command(about = "Issues the next number and records it in the ledger")]
    #[command(long_about = None)]
    Issue(IssueArgs),

    #[command(about = "Prints current counter values")]
    #[command(long_about = None)]
    Counters(CountersArgs),

    #[command(about = "Prints all issued numbers")]
    #[command(long_about = None)]
    List(ConfigArgs),
}

#[derive(clap::Args)]
struct ConfigArgs {
    #[arg(short = 'c', long, default_value = "./config.toml")]
    config_path: PathBuf,
}

#[derive(clap::Args)]
struct NumberArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Template name from the config.
    #[arg(short = 't', long, default_value = issuer::GENERATOR_ID, conflicts_with = "format")]
    template: TemplateName,

    /// Template given inline instead of a named one.
    #[arg(short = 'f', long)]
    format: Option<String>,

    /// Document date: today, yesterday, tomorrow or YYYY-MM-DD.
    #[arg(short = 'd', long, default_value = "today")]
    date: String,

    #[arg(long)]
    customer: Option<CustomerId>,
}

#[derive(clap::Args)]
struct IssueArgs {
    #[command(flatten)]
    number: NumberArgs,

    /// Do not ask for confirmation.
    #[arg(short = 'y', long)]
    yes: bool,

    /// Copy the issued number to the clipboard.
    #[arg(long)]
    copy: bool,
}

#[derive(clap::Args)]
struct CountersArgs {
    #[command(flatten)]
    config: ConfigArgs,

    #[arg(short = 'd', long, default_value = "today")]
    date: String,

    #[arg(long)]
    customer: Option<CustomerId>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match Cli::parse() {
        Cli::Version => {
            println!(env!("CARGO_PKG_VERSION"));
        }
        Cli::Format(args) => {
            let cfg = config::load(args.config.config_path.clone())?;
            let ledger = state::load(&cfg.state_path)?;

            let template = template_of(&cfg, &args)?;
            let date = date::resolve(&args.date)?;

            let number = issuer::next_number(&ledger, template, date, args.customer.as_ref())?;

            println!("{}", number);
        }
        Cli::Issue(args) => {
            debug!("Load config from {:?}", args.number.config.config_path);
            let cfg = config::load(args.number.config.config_path.clone())?;

            debug!("Load ledger from {:?}", cfg.state_path);
            let mut ledger = state::load(&cfg.state_path)?;

            let template = template_of(&cfg, &args.number)?;
            let date = date::resolve(&args.number.date)?;

            let mut customer = args.number.customer.clone();
            if customer.is_none() && !args.yes && formatter::needs_customer(template) {
                customer = Some(cli::ask_customer()?);
            }

            if !args.yes {
                let number = issuer::next_number(&ledger, template, date, customer.as_ref())?;
                if !cli::confirm(&number)? {
                    info!("Number {} was not issued", number);
                    return Ok(());
                }
            }

            let issued = issuer::issue(&mut ledger, template, date, customer.as_ref())?;

            debug!("Save ledger to {:?}", cfg.state_path);
            state::save(&ledger, &cfg.state_path)?;

            println!("{}", issued.number);

            if args.copy {
                cli_clipboard::set_contents(issued.number)
                    .map_err(|e| anyhow!("copy to clipboard: {}", e))?;
                info!("Number copied to clipboard");
            }
        }
        Cli::Counters(args) => {
            let cfg = config::load(args.config.config_path)?;
            let ledger = state::load(&cfg.state_path)?;

            let date = date::resolve(&args.date)?;

            cli::print_counters(&ledger.counters_at(date), args.customer.as_ref());
        }
        Cli::List(args) => {
            let cfg = config::load(args.config_path)?;
            let ledger = state::load(&cfg.state_path)?;

            cli::print_ledger(&ledger);
        }
    };

    Ok(())
}

fn template_of<'a>(cfg: &'a config::Config, args: &'a NumberArgs) -> anyhow::Result<&'a str> {
    match &args.format {
        Some(f) => Ok(f.as_str()),
        None => cfg.template(&args.template),
    }
}
