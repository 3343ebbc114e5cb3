//! ASTER CLI — headless projections, bot sessions, and ledger export.
//!
//! Commands:
//! - `project` — run a DCA projection and print the summary table
//! - `bot` — drive a seeded bot session over virtual time, print the log
//! - `coins` — fetch the market snapshot (falls back to the built-in set)
//! - `export` — write the realized-trade ledger as CSV

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use aster_core::bot::{BotSession, BotTuning, SessionIntervals};
use aster_core::clock::VirtualClock;
use aster_core::dca::{project, DcaParams, Frequency, VolatilityProfile};
use aster_core::market::{CircuitBreaker, CoinGeckoProvider, MarketFeed};
use aster_core::rng::SeedHierarchy;
use aster_core::store::{JsonStore, MemStore, Store};

#[derive(Parser)]
#[command(name = "aster", about = "ASTER CLI — crypto analytics simulation suite")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a DCA projection and print the summary.
    Project {
        /// Contribution per period, in USD.
        #[arg(long, default_value_t = 500.0)]
        amount: f64,

        /// Cadence: weekly, biweekly, monthly, quarterly.
        #[arg(long, default_value = "monthly")]
        frequency: String,

        /// Projection horizon in years.
        #[arg(long, default_value_t = 5)]
        years: u32,

        /// Simulated backtest context in years.
        #[arg(long, default_value_t = 1)]
        past_years: u32,

        /// Target annual yield, percent.
        #[arg(long, default_value_t = 45.0)]
        apy: f64,

        /// Asset symbol driving the volatility profile.
        #[arg(long, default_value = "BTC")]
        symbol: String,

        /// Enable the smart-accumulation rule.
        #[arg(long, default_value_t = false)]
        smart: bool,

        /// Master seed for the deterministic RNG.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Drive a headless bot session over virtual time.
    Bot {
        /// Virtual session length in seconds.
        #[arg(long, default_value_t = 120)]
        seconds: u64,

        /// Master seed for the deterministic RNG.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Scan opportunity threshold (lower = more signals).
        #[arg(long, default_value_t = 0.90)]
        scan_threshold: f64,

        /// Close any position left open when the session ends.
        #[arg(long, default_value_t = true)]
        close_at_end: bool,
    },
    /// Fetch and print the market snapshot.
    Coins {
        /// Master seed for the synthesized indicator fields.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Export the realized-trade ledger as CSV.
    Export {
        /// Store directory (shared with the TUI).
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Output file; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Project {
            amount,
            frequency,
            years,
            past_years,
            apy,
            symbol,
            smart,
            seed,
        } => run_project(amount, &frequency, years, past_years, apy, &symbol, smart, seed),
        Commands::Bot {
            seconds,
            seed,
            scan_threshold,
            close_at_end,
        } => run_bot(seconds, seed, scan_threshold, close_at_end),
        Commands::Coins { seed } => run_coins(seed),
        Commands::Export { data_dir, output } => run_export(&data_dir, output.as_deref()),
    }
}

fn parse_frequency(name: &str) -> Result<Frequency> {
    Ok(match name {
        "weekly" => Frequency::Weekly,
        "biweekly" => Frequency::Biweekly,
        "monthly" => Frequency::Monthly,
        "quarterly" => Frequency::Quarterly,
        _ => bail!("unknown frequency '{name}'. Valid: weekly, biweekly, monthly, quarterly"),
    })
}

#[allow(clippy::too_many_arguments)]
fn run_project(
    amount: f64,
    frequency: &str,
    years: u32,
    past_years: u32,
    apy: f64,
    symbol: &str,
    smart: bool,
    seed: u64,
) -> Result<()> {
    let params = DcaParams {
        contribution: amount,
        frequency: parse_frequency(frequency)?,
        projection_years: years,
        backtest_years: past_years,
        target_apy_pct: apy,
        smart_accumulation: smart,
        volatility: VolatilityProfile::for_symbol(symbol),
        ..DcaParams::default()
    };

    let mut rng = SeedHierarchy::new(seed).rng_for("dca", 0);
    let projection = project(&params, &mut rng);

    println!("=== DCA Projection ({symbol}) ===");
    println!(
        "Cadence:        {} (${amount:.2} per period)",
        params.frequency.label()
    );
    println!("Horizon:        {past_years}y back, {years}y forward at {apy:.1}% APY");
    println!("Smart accum.:   {}", if smart { "on" } else { "off" });
    println!();

    // Yearly samples keep the table readable at weekly cadence.
    let stride = i64::from(params.frequency.periods_per_year()).max(1);
    println!("{:>8} {:>16} {:>16}", "Period", "Invested", "Value");
    for point in &projection.points {
        if point.period % stride == 0 || !point.label.is_empty() {
            let tag = if point.label.is_empty() {
                String::new()
            } else {
                format!("  <- {}", point.label)
            };
            println!(
                "{:>8} {:>16.2} {:>16.2}{tag}",
                point.period, point.total_invested, point.portfolio_value
            );
        }
    }

    println!();
    println!("--- Summary ---");
    println!("Total invested: ${:.2}", projection.summary.total_invested);
    println!("Final value:    ${:.2}", projection.summary.final_value);
    println!("Total return:   {:.1}%", projection.summary.total_return_pct);

    Ok(())
}

fn run_bot(seconds: u64, seed: u64, scan_threshold: f64, close_at_end: bool) -> Result<()> {
    let tuning = BotTuning {
        scan_opportunity_threshold: scan_threshold,
        ..BotTuning::default()
    };
    let mut session = BotSession::new(
        tuning,
        SessionIntervals::default(),
        SeedHierarchy::new(seed).rng_for("bot", 0),
        VirtualClock::at_epoch(),
        Box::new(MemStore::new()),
    );

    // Auto-execute keeps the headless run hands-free.
    session.toggle_auto_execute();
    session.activate();

    let steps = seconds * 5; // 200ms resolution
    for _ in 0..steps {
        session.clock().advance(chrono::Duration::milliseconds(200));
        session.poll();
    }

    if close_at_end && session.position().is_some() {
        session.close_position();
    }

    println!("=== Bot Session ({seconds}s virtual, seed {seed}) ===");
    for entry in session.logs().iter() {
        let asset = entry
            .asset
            .as_deref()
            .map(|a| format!(" [{a}]"))
            .unwrap_or_default();
        println!(
            "{} {:<8} {}{asset}",
            entry.timestamp,
            entry.level.label(),
            entry.message
        );
    }

    let ledger = session.ledger();
    println!();
    println!("--- Performance ---");
    println!("Phase:          {}", session.phase().label());
    println!("Balance:        ${:.2}", session.balance());
    println!("Trades:         {}", ledger.total_trades);
    println!("Win rate:       {:.1}%", ledger.win_rate_pct);
    println!("Profit factor:  {:.2}", ledger.profit_factor);
    println!("Net P&L:        ${:+.2}", ledger.net_pnl);

    Ok(())
}

fn run_coins(seed: u64) -> Result<()> {
    let breaker = Arc::new(CircuitBreaker::default_provider());
    let provider = CoinGeckoProvider::new(breaker, SeedHierarchy::new(seed).rng_for("market", 0));
    let feed = MarketFeed::new(Box::new(provider));

    let update = feed.fetch();

    println!("=== Market Snapshot [{}] ===", update.source.label());
    println!(
        "Market cap: ${:.2}T | Volume: ${:.1}B | BTC dom: {:.1}% | Sentiment: {:.0}",
        update.metrics.total_market_cap / 1e12,
        update.metrics.total_volume / 1e9,
        update.metrics.btc_dominance,
        update.metrics.sentiment_index
    );
    println!();
    println!(
        "{:<6} {:<14} {:>14} {:>8} {:>12} {:>10}",
        "Sym", "Name", "Price", "24h%", "SMA 8W", "S2F"
    );
    for coin in update.coins.iter().take(15) {
        println!(
            "{:<6} {:<14} {:>14.2} {:>7.1}% {:>12.2} {:>10.2}",
            coin.symbol, coin.name, coin.price, coin.change_24h_pct, coin.sma_8w, coin.s2f_ratio
        );
    }

    Ok(())
}

fn run_export(data_dir: &std::path::Path, output: Option<&std::path::Path>) -> Result<()> {
    let store = JsonStore::new(data_dir);
    let trades = store.trade_history();

    if trades.is_empty() {
        println!("No realized trades in {}.", data_dir.display());
        return Ok(());
    }

    let mut writer: csv::Writer<Box<dyn std::io::Write>> = match output {
        Some(path) => csv::Writer::from_writer(Box::new(std::fs::File::create(path)?)),
        None => csv::Writer::from_writer(Box::new(std::io::stdout())),
    };

    writer.write_record([
        "asset",
        "direction",
        "leverage",
        "entry_price",
        "exit_price",
        "margin",
        "pnl_usd",
        "pnl_percent",
        "opened_at",
        "closed_at",
    ])?;
    for trade in &trades {
        writer.write_record([
            trade.asset.clone(),
            trade.direction.label().to_string(),
            trade.leverage.to_string(),
            format!("{:.2}", trade.entry_price),
            format!("{:.2}", trade.exit_price),
            format!("{:.2}", trade.margin),
            format!("{:.2}", trade.pnl_usd),
            format!("{:.4}", trade.pnl_percent),
            trade.opened_at.to_rfc3339(),
            trade.closed_at.to_rfc3339(),
        ])?;
    }
    writer.flush()?;

    if let Some(path) = output {
        println!("Exported {} trade(s) to {}", trades.len(), path.display());
    }

    Ok(())
}
