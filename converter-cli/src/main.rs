//! Currency Converter CLI
//!
//! Converts amounts and prints official rates of the National Bank of the
//! Republic of Belarus, or plots their dynamics for a period.

mod config;
mod plot;

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser, error::ErrorKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use converter_client::HttpGateway;
use converter_types::{BASE_CURRENCY, RateTransport};
use exchange_rates::CurrencyConverter;

use crate::config::Config;
use crate::plot::Chart;

#[derive(Parser, Debug)]
#[command(name = "converter")]
#[command(author, version, about = "Command-line currency converter", long_about = None)]
struct Cli {
    /// The summa to convert (default 1.0) followed by the alphabetic currency
    /// code according to ISO 4217 (use "FROM-TO" to set a target other than BYN)
    #[arg(
        value_names = ["SUMMA", "CURRENCY"],
        num_args = 1..=2,
        required = true,
        allow_negative_numbers = true
    )]
    args: Vec<String>,

    /// The date for rate (YYYY-MM-DD), or the start and end of the period for plot
    #[arg(long, value_name = "DATE")]
    date: Option<Vec<String>>,

    /// Print the rate on the date
    #[arg(long)]
    rate: bool,

    /// Plot the rate dynamics for the period (no more than 365 days)
    #[arg(long)]
    plot: bool,

    /// Base URL of the exchange-rate API (overrides NBRB_API_URL)
    #[arg(long)]
    api_url: Option<String>,
}

/// What the command line asks for, after cross-argument validation.
#[derive(Debug, PartialEq)]
enum Mode {
    Plot {
        currency: String,
        start: String,
        end: String,
    },
    Rate {
        currency: String,
        date: Option<String>,
    },
    Convert {
        summa: f64,
        from: String,
        to: String,
        date: Option<String>,
    },
}

impl Cli {
    /// Parses `argv`. `--date` takes one value, or exactly two (and becomes
    /// required) when `--plot` appears anywhere on the command line.
    fn parse_argv<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        let plot = argv.iter().skip(1).any(|arg| arg == "--plot");
        let command = Cli::command().mut_arg("date", |date| {
            if plot {
                date.num_args(2).required(true)
            } else {
                date.num_args(1)
            }
        });
        let mut matches = command.try_get_matches_from(argv)?;
        Cli::from_arg_matches_mut(&mut matches)
    }

    fn mode(&self) -> Result<Mode, clap::Error> {
        let (summa, currency) = match self.args.as_slice() {
            [currency] => (1.0, currency.clone()),
            [summa, currency] => {
                let summa = summa.parse::<f64>().map_err(|_| {
                    usage_error(
                        ErrorKind::ValueValidation,
                        format!("invalid value '{summa}' for '[SUMMA]': invalid float literal"),
                    )
                })?;
                (summa, currency.clone())
            }
            [_, _, extra, ..] => {
                return Err(usage_error(
                    ErrorKind::UnknownArgument,
                    format!("unexpected argument '{extra}' found"),
                ));
            }
            [] => {
                return Err(usage_error(
                    ErrorKind::MissingRequiredArgument,
                    "the following required arguments were not provided: <CURRENCY>",
                ));
            }
        };

        let dates = self.date.clone().unwrap_or_default();

        if self.plot {
            return match dates.as_slice() {
                [start, end] => Ok(Mode::Plot {
                    currency,
                    start: start.clone(),
                    end: end.clone(),
                }),
                _ => Err(usage_error(
                    ErrorKind::WrongNumberOfValues,
                    "argument --date: expected 2 arguments with --plot",
                )),
            };
        }

        let date = match dates.as_slice() {
            [] => None,
            [date] => Some(date.clone()),
            [_, extra, ..] => {
                return Err(usage_error(
                    ErrorKind::UnknownArgument,
                    format!("unrecognized arguments: {extra}"),
                ));
            }
        };

        if self.rate {
            return Ok(Mode::Rate { currency, date });
        }

        let mut codes = currency.split('-');
        let (from, to) = match (codes.next(), codes.next()) {
            (Some(from), Some(to)) => (from.to_string(), to.to_string()),
            _ => (currency.clone(), BASE_CURRENCY.to_string()),
        };
        Ok(Mode::Convert {
            summa,
            from,
            to,
            date,
        })
    }
}

fn usage_error(kind: ErrorKind, message: impl std::fmt::Display) -> clap::Error {
    Cli::command().error(kind, message)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Runs one operation and returns the line(s) to print, if any.
async fn run<T: RateTransport>(converter: &CurrencyConverter<T>, mode: Mode) -> Result<Option<String>> {
    match mode {
        Mode::Plot {
            currency,
            start,
            end,
        } => {
            let dynamics = converter
                .get_rate_dynamics(&currency, &start, &end)
                .await
                .into_result()?;
            if dynamics.is_empty() {
                return Ok(None);
            }
            Ok(Some(Chart::default().render(&currency, &dynamics)?))
        }

        Mode::Rate { currency, date } => {
            let rate = converter
                .get_rate(&currency, date.as_deref())
                .await
                .into_result()?;
            Ok(Some(format!(
                "{:?} {}: {:?} {}\n",
                rate.scale,
                currency.to_uppercase(),
                rate.official_rate,
                BASE_CURRENCY
            )))
        }

        Mode::Convert {
            summa,
            from,
            to,
            date,
        } => {
            let result = converter
                .convert(summa, &from, &to, date.as_deref())
                .await
                .into_result()?;
            Ok(Some(format!(
                "{:?} {} = {:.4} {}\n",
                summa,
                from.to_uppercase(),
                result,
                to.to_uppercase()
            )))
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_argv(std::env::args_os()).unwrap_or_else(|err| err.exit());
    let mode = cli.mode().unwrap_or_else(|err| err.exit());

    init_tracing();

    let mut config = Config::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    tracing::debug!(?config, ?mode, "starting");

    let gateway = HttpGateway::with_config(config.gateway_config())?;
    let converter = CurrencyConverter::new(gateway);

    // The error text replaces the result line.
    match run(&converter, mode).await {
        Ok(output) => {
            print!("{}", output.unwrap_or_default());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}
