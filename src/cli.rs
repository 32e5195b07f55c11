use std::path::PathBuf;

use crate::classifier::MatchMode;
use crate::config::{ScrapeConfig, DEFAULT_MAX_EXPAND_ATTEMPTS, DEFAULT_MIN_OFFERS};
use crate::error::ScrapeError;
use crate::report::{OutputMode, DEFAULT_PLOT_OUTPUT};
use crate::Result;

pub const HELP: &str = include_str!("cli_help.txt");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    pub search_term: String,
    pub location: String,
    pub offer_num: usize,
    pub headless: bool,
    pub as_plots: bool,
    pub plot_output: Option<PathBuf>,
    pub match_mode: MatchMode,
    pub max_expand_attempts: u32,
    pub verbose: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            location: String::new(),
            offer_num: DEFAULT_MIN_OFFERS,
            headless: false,
            as_plots: false,
            plot_output: None,
            match_mode: MatchMode::default(),
            max_expand_attempts: DEFAULT_MAX_EXPAND_ATTEMPTS,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Params),
    Help,
}

impl Params {
    pub fn scrape_config(&self) -> ScrapeConfig {
        let mut config = ScrapeConfig {
            match_mode: self.match_mode,
            max_expand_attempts: self.max_expand_attempts,
            ..ScrapeConfig::default()
        };
        config.search.search_term = self.search_term.clone();
        config.search.location = self.location.clone();
        config.search.min_offers = self.offer_num;
        config.search.headless = self.headless;
        config
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.as_plots {
            OutputMode::Plots {
                output_dir: self
                    .plot_output
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_PLOT_OUTPUT)),
            }
        } else {
            OutputMode::Text
        }
    }
}

/// Parses arguments (without the program name). Every failure is a usage error.
pub fn parse_args<I, S>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut params = Params::default();
    let mut args = args.into_iter().map(Into::into);

    while let Some(a) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| usage(format!("Missing value for {flag}")))
        };

        match a.as_str() {
            "-s" | "--search-term" => params.search_term = value(&a)?,
            "-l" | "--location" => params.location = value(&a)?,
            "-n" | "--offer-num" => {
                let v = value(&a)?;
                params.offer_num = match v.parse() {
                    Ok(n) if n > 0 => n,
                    _ => return Err(usage(format!("Invalid offer number: {v}"))),
                };
            }
            "--headless" => params.headless = true,
            "--as-plots" => params.as_plots = true,
            "--plot-output" => params.plot_output = Some(PathBuf::from(value(&a)?)),
            "--match" => {
                let v = value(&a)?;
                params.match_mode =
                    MatchMode::parse(&v).ok_or_else(|| usage(format!("Unknown match mode: {v}")))?;
            }
            "--max-expand-attempts" => {
                let v = value(&a)?;
                params.max_expand_attempts = match v.parse() {
                    Ok(n) if n > 0 => n,
                    _ => return Err(usage(format!("Invalid attempt count: {v}"))),
                };
            }
            "-v" | "--verbose" => params.verbose = true,
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(usage(format!("Unknown arg: {a}"))),
        }
    }

    if params.plot_output.is_some() && !params.as_plots {
        return Err(usage("--plot-output only can be used with --as-plots".to_string()));
    }

    Ok(Command::Run(params))
}

fn usage(message: String) -> ScrapeError {
    ScrapeError::Usage(message)
}
