// src/cli.rs
use std::path::PathBuf;

use crate::config::{AppOptions, OutputFormat};
use crate::error::{Error, Result};
use crate::session::Session;
use crate::{log, report};

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Summary(AppOptions),
    Version,
    Help,
}

pub fn run() -> Result<()> {
    match parse_args(std::env::args().skip(1))? {
        Command::Summary(opts) => summary(&opts),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Help => {
            eprintln!("{}", include_str!("cli_help.txt"));
            Ok(())
        }
    }
}

fn summary(opts: &AppOptions) -> Result<()> {
    log::init(&opts.log)?;
    let creds = opts.load_credentials()?;

    let mut session = Session::from_options(opts)?;
    session.login(&creds.username, &creds.password)?;
    let profile = session.profile()?;
    let cards = session.cards()?;

    for f in &cards.failures {
        eprintln!("Warning: card block {} skipped: {}", f.index, f.error);
    }
    println!("{}", report::render(&profile, &cards.cards, opts.format));
    Ok(())
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command> {
    let mut args = args.into_iter();
    let mut opts = AppOptions::default();
    let mut want_summary = false;

    while let Some(a) = args.next() {
        match a.as_str() {
            "summary" => want_summary = true,
            "--version" => return Ok(Command::Version),
            "-h" | "--help" => return Ok(Command::Help),
            "--account" => opts.account = value(&mut args, "--account")?,
            "--config" => opts.config_path = Some(PathBuf::from(value(&mut args, "--config")?)),
            "--format" => {
                let v = value(&mut args, "--format")?;
                opts.format = OutputFormat::parse(&v)
                    .ok_or_else(|| Error::Cli(format!("Unknown format: {}", v)))?;
            }
            "--debug-capture" => {
                opts.extract.debug_capture = Some(PathBuf::from(value(&mut args, "--debug-capture")?))
            }
            "--log-file" => opts.log.file = Some(PathBuf::from(value(&mut args, "--log-file")?)),
            "--timeout" => {
                let v = value(&mut args, "--timeout")?;
                opts.timeout_secs = v
                    .parse()
                    .map_err(|_| Error::Cli(format!("Invalid timeout: {}", v)))?;
            }
            "-v" | "--verbose" => opts.log.verbose = true,
            _ => return Err(Error::Cli(format!("Unknown arg: {}", a))),
        }
    }

    if want_summary { Ok(Command::Summary(opts)) } else { Ok(Command::Help) }
}

fn value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String> {
    args.next().ok_or_else(|| Error::Cli(format!("Missing value for {}", flag)))
}
