// In app/src/shell.rs

use crate::report;
use anyhow::Result;
use core_types::{AssetClass, TimeStep};
use engine::Simulation;
use std::io::{BufRead, Write};

const MENU: &str = "\
Choose an option:
1. View Portfolio
2. View Available Stocks (S&P 500)
3. View Commodities (Gold & Silver)
4. View Cryptocurrencies (Top 10 Market Cap)
5. Buy Asset
6. Sell Asset
7. Advance Time
8. View Time Interval Options
9. View Investment Summary
10. Exit";

enum Flow {
    Continue,
    Exit,
}

/// Prints `label` and reads one trimmed line. `None` means end of input.
pub fn prompt(input: &mut impl BufRead, output: &mut impl Write, label: &str) -> Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// The numbered-menu loop over one simulation.
pub struct Shell<R, W> {
    simulation: Simulation,
    player: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(simulation: Simulation, player: String, input: R, output: W) -> Self {
        Self {
            simulation,
            player,
            input,
            output,
        }
    }

    /// Runs until the player exits or input ends, then prints the final report.
    pub fn run(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "\nHello, {}! Your simulation begins on {}",
            self.player,
            report::date(self.simulation.valuation().timestamp)
        )?;
        writeln!(self.output, "Your investment journey begins today.")?;

        loop {
            writeln!(self.output, "\n======================================")?;
            writeln!(
                self.output,
                "CURRENT DATE: {}",
                report::date(self.simulation.valuation().timestamp)
            )?;
            writeln!(self.output, "======================================")?;
            writeln!(self.output, "{MENU}")?;

            let Some(choice) = self.ask("\nEnter your choice: ")? else {
                break;
            };
            if let Flow::Exit = self.handle(&choice)? {
                break;
            }
        }

        self.farewell()
    }

    fn ask(&mut self, label: &str) -> Result<Option<String>> {
        prompt(&mut self.input, &mut self.output, label)
    }

    fn handle(&mut self, choice: &str) -> Result<Flow> {
        match choice {
            "1" => report::portfolio(
                &mut self.output,
                &self.simulation.valuation(),
                self.simulation.catalog(),
            )?,
            "2" => self.list(AssetClass::Equity)?,
            "3" => self.list(AssetClass::Commodity)?,
            "4" => self.list(AssetClass::Crypto)?,
            "5" => self.trade(true)?,
            "6" => self.trade(false)?,
            "7" => self.advance()?,
            "8" => report::time_steps(&mut self.output)?,
            "9" => {
                report::history(&mut self.output, self.simulation.history())?;
                report::summary(&mut self.output, &self.simulation.summary())?;
            }
            "10" => return Ok(Flow::Exit),
            _ => writeln!(self.output, "Invalid choice, please try again.")?,
        }
        Ok(Flow::Continue)
    }

    fn list(&mut self, class: AssetClass) -> Result<()> {
        report::listing(&mut self.output, class, self.simulation.quotes(class))?;
        Ok(())
    }

    fn trade(&mut self, buying: bool) -> Result<()> {
        let verb = if buying { "buy" } else { "sell" };
        let Some(name) = self.ask(&format!("Enter the asset name you want to {verb}: "))? else {
            return Ok(());
        };
        let Some(quantity) = self.ask(&format!("Enter the quantity you want to {verb}: "))? else {
            return Ok(());
        };

        let Ok(quantity) = quantity.parse::<u64>() else {
            writeln!(self.output, "Quantity must be a whole number of units.")?;
            return Ok(());
        };

        let result = if buying {
            self.simulation.buy(&name, quantity)
        } else {
            self.simulation.sell(&name, quantity)
        };
        match result {
            Ok(fill) => report::fill(&mut self.output, &fill)?,
            Err(err) => {
                tracing::debug!(asset = %name, quantity, error = %err, "Trade rejected.");
                writeln!(self.output, "Trade failed: {err}")?;
            }
        }
        Ok(())
    }

    fn advance(&mut self) -> Result<()> {
        let Some(answer) = self.ask("\nSelect time interval (1H, 4H, 1D, 1W, 1M): ")? else {
            return Ok(());
        };
        match answer.parse::<TimeStep>() {
            Ok(step) => {
                let advanced = self.simulation.advance_time(step);
                report::advance(&mut self.output, &advanced)?;
            }
            Err(err) => writeln!(self.output, "{err}. Please try again.")?,
        }
        Ok(())
    }

    fn farewell(&mut self) -> Result<()> {
        writeln!(self.output, "\nThank you for using the Investment Simulator, {}!", self.player)?;
        writeln!(self.output, "Your simulation ran for {} days.", self.simulation.day())?;
        writeln!(self.output, "Final portfolio summary:")?;
        report::portfolio(
            &mut self.output,
            &self.simulation.valuation(),
            self.simulation.catalog(),
        )?;
        report::summary(&mut self.output, &self.simulation.summary())?;
        writeln!(self.output, "\nHappy investing in the real world!")?;
        Ok(())
    }
}
