use anyhow::{Context, Result};
use clap::Parser;
use ratecalc::calculator::{Session, copy_display, looks_like_key_script, parse_keys};
use ratecalc::config::Config;
use ratecalc::currency::{CurrencyPair, RateTable};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ratecalc")]
#[command(about = "Calculator with currency conversion, driven by key scripts")]
struct Cli {
    /// Keys to press, e.g. "12+3×4=". Reads lines from stdin when omitted.
    keys: Option<String>,

    /// Currency the result is entered in
    #[arg(long)]
    from: Option<String>,

    /// Currency to convert the result to
    #[arg(long)]
    to: Option<String>,

    /// Saved exchange-rate API response (JSON)
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Copy the final display to the clipboard
    #[arg(long)]
    copy: bool,
}

/// Everything a running calculator needs.
struct App {
    session: Session,
    pair: CurrencyPair,
    rates: Option<RateTable>,
}

impl App {
    /// Press every key in `line` and print what the display shows.
    fn run_line(&mut self, line: &str, out: &mut impl Write) -> Result<()> {
        let keys = parse_keys(line)?;
        let mut last = None;
        for key in keys {
            if let Some(result) = self.session.press(key) {
                last = Some(result);
            }
        }

        writeln!(out, "{}", self.session.display())?;
        if let Some(value) = last.and_then(|result| result.value()) {
            self.print_conversion(value, out)?;
        }
        Ok(())
    }

    /// Print the converted amount; skipped when rates are unavailable.
    fn print_conversion(&self, value: f64, out: &mut impl Write) -> Result<()> {
        let Some(rates) = &self.rates else {
            debug!("no rate table, skipping conversion");
            return Ok(());
        };

        match self.pair.convert_display(value, rates) {
            Ok(converted) => writeln!(out, "{} {}", converted, self.pair.to)?,
            Err(err) => debug!(%err, "conversion skipped"),
        }
        Ok(())
    }

    /// Swap the currencies and re-convert the current value.
    fn swap(&mut self, out: &mut impl Write) -> Result<()> {
        self.pair.swap();
        writeln!(out, "{}", self.pair)?;
        if let Some(value) = self.session.current_value() {
            self.print_conversion(value, out)?;
        }
        Ok(())
    }

    fn exchange_info(&self, out: &mut impl Write) -> Result<()> {
        let Some(rates) = &self.rates else {
            writeln!(out, "exchange rates not loaded")?;
            return Ok(());
        };

        match self.pair.exchange_info(rates) {
            Ok(info) => writeln!(out, "{}", info)?,
            Err(err) => writeln!(out, "{}", err)?,
        }
        if let Some(updated_at) = rates.updated_at() {
            writeln!(out, "rates updated at {} (unix time)", updated_at)?;
        }
        Ok(())
    }

    /// Handle one line of input. Returns `false` when the user quits.
    fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<bool> {
        match line.trim() {
            "" => {}
            "quit" | "exit" => return Ok(false),
            "swap" => self.swap(out)?,
            "rate" => self.exchange_info(out)?,
            line if looks_like_key_script(line) => {
                if let Err(err) = self.run_line(line, out) {
                    warn!(input = line, %err, "key script rejected");
                    writeln!(out, "{}", err)?;
                }
            }
            line => {
                warn!(input = line, "not a key script");
                writeln!(out, "unrecognized input: {}", line)?;
            }
        }
        Ok(true)
    }

    /// Read key scripts from stdin until EOF or `quit`.
    fn repl(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut out = io::stdout().lock();

        for line in stdin.lock().lines() {
            let line = line.context("Failed to read stdin")?;
            let keep_going = self.handle_line(&line, &mut out)?;
            out.flush()?;
            if !keep_going {
                break;
            }
        }
        Ok(())
    }
}

fn load_rates(config: &Config) -> Option<RateTable> {
    let path = config.rates_path()?;
    match RateTable::load(&path) {
        Ok(rates) => Some(rates),
        Err(err) => {
            info!(%err, "exchange rates unavailable");
            None
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(from) = cli.from {
        config.from = from;
    }
    if let Some(to) = cli.to {
        config.to = to;
    }
    if let Some(rates) = cli.rates {
        config.rates_file = Some(rates);
    }

    let mut app = App {
        session: Session::new(),
        pair: config.pair(),
        rates: load_rates(&config),
    };

    match cli.keys {
        Some(keys) => app.run_line(&keys, &mut io::stdout().lock())?,
        None => app.repl()?,
    }

    if cli.copy {
        let shown = app.session.display();
        copy_display(&shown).context("Failed to copy result")?;
        info!(display = %shown, "copied to clipboard");
    }

    Ok(())
}
