// In app/src/report.rs

//! Console tables for the interactive shell and the batch runner.

use analytics::{HistoryRecord, PerformanceReport};
use chrono::{DateTime, Utc};
use core_types::{AssetClass, AssetQuote, Side, TimeStep};
use engine::AdvanceReport;
use market::AssetCatalog;
use portfolio::{Fill, Valuation};
use rust_decimal::Decimal;
use std::io::{self, Write};

const WIDE_RULE: &str = "------------------------------------------------------------------------------------------------------------------------";
const RULE: &str = "------------------------------------------------------------------";
const NARROW_RULE: &str = "------------------------------------------------------";

pub fn date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%A, %B %-d, %Y %H:%M UTC").to_string()
}

pub fn money(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

/// Sub-dollar crypto prices keep four decimals, everything else two.
pub fn price(class: Option<AssetClass>, price: Decimal) -> String {
    if class == Some(AssetClass::Crypto) && price < Decimal::ONE {
        format!("${:.4}", price)
    } else {
        money(price)
    }
}

fn percent(fraction: f64) -> String {
    format!("{:+.2}%", fraction * 100.0)
}

pub fn fill(out: &mut impl Write, fill: &Fill) -> io::Result<()> {
    match fill.side {
        Side::Buy => writeln!(
            out,
            "Successfully bought {} units of {} for {}",
            fill.quantity,
            fill.asset,
            money(fill.amount)
        ),
        Side::Sell => writeln!(
            out,
            "Successfully sold {} units of {} for {} (realized P&L {})",
            fill.quantity,
            fill.asset,
            money(fill.amount),
            money(fill.realized_pnl())
        ),
    }
}

pub fn portfolio(out: &mut impl Write, valuation: &Valuation, catalog: &AssetCatalog) -> io::Result<()> {
    writeln!(out, "\nCurrent Balance: {}", money(valuation.balance))?;
    writeln!(out, "Current Date: {} (day {})", date(valuation.timestamp), valuation.day)?;
    writeln!(out, "Total Portfolio Value: {}", money(valuation.total_value))?;
    writeln!(out, "\nYour Assets:")?;

    if valuation.positions.is_empty() {
        return writeln!(out, "You don't own any assets yet.");
    }

    writeln!(out, "{WIDE_RULE}")?;
    writeln!(
        out,
        "{:<20} | {:<10} | {:<20} | {:<20} | {:<15} | {:<15}",
        "Asset", "Quantity", "Purchase Value", "Current Value", "Profit/Loss", "Return"
    )?;
    writeln!(out, "{WIDE_RULE}")?;
    for position in &valuation.positions {
        let class = catalog.get(&position.name).map(|q| q.class);
        writeln!(
            out,
            "{:<20} | {:<10} | {:<20} | {:<20} | {:<15} | {:<15}",
            position.name,
            position.quantity,
            money(position.cost_basis),
            format!("{} @ {}", money(position.market_value), price(class, position.last_price)),
            money(position.profit_loss()),
            format!("{:.2}%", position.return_percent())
        )?;
    }
    writeln!(out, "{WIDE_RULE}")
}

pub fn listing<'a>(
    out: &mut impl Write,
    class: AssetClass,
    quotes: impl Iterator<Item = &'a AssetQuote>,
) -> io::Result<()> {
    let (heading, column, note) = match class {
        AssetClass::Equity => (
            "Available Stocks (Top S&P 500 Companies)",
            "Company",
            "US Stocks typically have a volatility range of around ±5%",
        ),
        AssetClass::Commodity => (
            "Available Commodities",
            "Commodity",
            "Commodities typically have a volatility range of around ±3%",
        ),
        AssetClass::Crypto => (
            "Available Cryptocurrencies (Top 10 Market Cap)",
            "Cryptocurrency",
            "Cryptocurrencies have a higher volatility range of around ±10-30%",
        ),
    };

    writeln!(out, "\n{heading}:")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "{:<20} | {:<12} | {:<16} | {:<10}", column, "Price ($)", "Daily Change (%)", "Volatility")?;
    writeln!(out, "{RULE}")?;
    for quote in quotes {
        writeln!(
            out,
            "{:<20} | {:<12} | {:<16} | {:<10}",
            quote.name,
            price(Some(quote.class), quote.price),
            percent(quote.daily_change),
            format!("{:.1}%", quote.volatility * 100.0)
        )?;
    }
    writeln!(out, "{RULE}")?;
    writeln!(out, "{note}")
}

pub fn time_steps(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nAvailable Time Intervals:")?;
    writeln!(out, "-------------------------------------------------------")?;
    writeln!(out, "{:<5} | {:<10} | {:<30}", "Code", "Duration", "Volatility Factor")?;
    writeln!(out, "-------------------------------------------------------")?;
    for step in TimeStep::ALL {
        writeln!(out, "{:<5} | {:<10} | x{:<29}", step.id(), step.label(), step.factor())?;
    }
    writeln!(out, "-------------------------------------------------------")?;
    writeln!(out, "Note: Longer time intervals will result in greater price movements")
}

pub fn advance(out: &mut impl Write, report: &AdvanceReport) -> io::Result<()> {
    writeln!(out, "\n==== {} PASSED ({}) ====", report.step.label(), date(report.timestamp))?;
    writeln!(
        out,
        "Market has updated after {} interval. All asset prices have been adjusted.",
        report.step.label()
    )?;

    writeln!(out, "\nMajor Price Movements:")?;
    writeln!(out, "------------------------")?;
    if report.movements.is_empty() {
        writeln!(out, "No significant price movements in this interval.")?;
    }
    for movement in &report.movements {
        let direction = if movement.change > 0.0 { "increased" } else { "decreased" };
        writeln!(
            out,
            "{:<20}: {} by {:.2}% to {}",
            movement.name,
            direction,
            movement.change.abs() * 100.0,
            price(Some(movement.class), movement.price)
        )?;
    }

    writeln!(
        out,
        "\nDay {}: portfolio value {} ({:.2}% vs. previous high)",
        report.day,
        money(report.record.total_value),
        report.record.roi_percent
    )
}

pub fn history(out: &mut impl Write, records: &[HistoryRecord]) -> io::Result<()> {
    writeln!(out, "\nInvestment History:")?;
    writeln!(out, "{NARROW_RULE}")?;
    writeln!(out, "{:<5} | {:<15} | {:<15}", "Day", "Total Value ($)", "ROI (%)")?;
    writeln!(out, "{NARROW_RULE}")?;
    if records.is_empty() {
        writeln!(out, "No history yet. Advance time to start recording.")?;
    }
    for record in records {
        writeln!(
            out,
            "{:<5} | {:<15} | {:<15}",
            record.day,
            money(record.total_value),
            format!("{:.2}%", record.roi_percent)
        )?;
    }
    writeln!(out, "{NARROW_RULE}")
}

pub fn summary(out: &mut impl Write, report: &PerformanceReport) -> io::Result<()> {
    writeln!(out, "\nInvestment Summary:")?;
    writeln!(out, "{NARROW_RULE}")?;
    writeln!(out, "{:<5} | {:<15} | {:<15}", "Day", "Total Value ($)", "ROI (%)")?;
    writeln!(out, "{NARROW_RULE}")?;
    writeln!(
        out,
        "{:<5} | {:<15} | {:<15}",
        report.day,
        money(report.total_value),
        format!("{:.2}%", report.roi_vs_peak_percent)
    )?;
    writeln!(out, "{NARROW_RULE}")?;

    writeln!(out, "All-time high:      {}", money(report.all_time_high))?;
    writeln!(
        out,
        "Net P&L:            {} ({:.2}%)",
        money(report.net_pnl_absolute),
        report.net_pnl_percentage
    )?;
    writeln!(
        out,
        "Max drawdown:       {} ({:.2}%)",
        money(report.max_drawdown_absolute),
        report.max_drawdown_percentage
    )?;
    if let (Some(best), Some(worst)) = (report.best_value, report.worst_value) {
        writeln!(out, "Best / worst value: {} / {}", money(best), money(worst))?;
    }
    writeln!(out, "Recorded steps:     {}", report.records)
}
