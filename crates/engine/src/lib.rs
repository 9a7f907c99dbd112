// In crates/engine/src/lib.rs

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{AdvanceReport, PriceMovement, SimulationParams};

use analytics::{AnalyticsEngine, HistoryRecord, HistoryTracker, PerformanceReport};
use app_config::Settings;
use core_types::{AssetClass, AssetQuote, TimeStep};
use market::{AssetCatalog, PriceSimulator, RandomSource, SeededRandom};
use portfolio::{Fill, Portfolio, Valuation};
use rust_decimal::Decimal;

/// One player's simulated market session.
///
/// Owns the catalog, the price model, the ledger and the value history.
/// Nothing is shared, so independent simulations can live side by side.
pub struct Simulation {
    catalog: AssetCatalog,
    simulator: PriceSimulator,
    portfolio: Portfolio,
    history: HistoryTracker,
    analytics: AnalyticsEngine,
    max_movements_per_class: usize,
}

impl Simulation {
    /// Starts a simulation over the default asset list.
    pub fn new(params: SimulationParams, random: Box<dyn RandomSource + Send>) -> Result<Self> {
        Self::with_catalog(AssetCatalog::with_default_assets()?, params, random)
    }

    pub fn with_catalog(
        catalog: AssetCatalog,
        params: SimulationParams,
        random: Box<dyn RandomSource + Send>,
    ) -> Result<Self> {
        let portfolio = Portfolio::new(params.initial_balance, params.start)?;

        tracing::info!(
            assets = catalog.len(),
            initial_balance = %params.initial_balance,
            start = %params.start,
            "Simulation initialized."
        );

        Ok(Self {
            catalog,
            simulator: PriceSimulator::new(random),
            portfolio,
            history: HistoryTracker::new(),
            analytics: AnalyticsEngine::new(),
            max_movements_per_class: params.max_movements_per_class,
        })
    }

    /// Builds a simulation from loaded settings, seeding the price model
    /// from `simulation.seed` when it is set.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let random: Box<dyn RandomSource + Send> = match settings.simulation.seed {
            Some(seed) => {
                tracing::info!(seed, "Using a fixed price seed.");
                Box::new(SeededRandom::from_seed(seed))
            }
            None => Box::new(SeededRandom::from_entropy()),
        };
        Self::new(SimulationParams::from_settings(settings), random)
    }

    /// Buys at the current catalog price. The name is matched
    /// case-insensitively and the position is kept under the listed name.
    pub fn buy(&mut self, name: &str, quantity: u64) -> Result<Fill> {
        let (listed, price) = self.listed_price(name)?;
        Ok(self.portfolio.buy(&listed, quantity, price, &self.catalog)?)
    }

    /// Sells at the current catalog price.
    pub fn sell(&mut self, name: &str, quantity: u64) -> Result<Fill> {
        let (listed, price) = self.listed_price(name)?;
        Ok(self.portfolio.sell(&listed, quantity, price, &self.catalog)?)
    }

    /// Moves the clock, reprices the market, revalues the holdings and
    /// records the new total value.
    pub fn advance_time(&mut self, step: TimeStep) -> AdvanceReport {
        self.portfolio.advance_clock(step);
        self.simulator.advance(&mut self.catalog, step.factor());
        self.portfolio.revalue(&self.catalog);
        let record = self.portfolio.record_history(&mut self.history);

        let movements = significant_movements(&self.catalog, self.max_movements_per_class);

        tracing::info!(
            %step,
            day = record.day,
            total_value = %record.total_value,
            roi = record.roi_percent,
            movements = movements.len(),
            "Advanced simulated time."
        );

        AdvanceReport {
            step,
            day: record.day,
            timestamp: record.timestamp,
            movements,
            record,
        }
    }

    pub fn valuation(&self) -> Valuation {
        self.portfolio.valuation()
    }

    pub fn history(&self) -> &[HistoryRecord] {
        self.history.records()
    }

    /// A read-only performance report over the whole session.
    pub fn summary(&self) -> PerformanceReport {
        self.analytics.calculate(
            self.portfolio.initial_balance(),
            self.portfolio.all_time_high(),
            self.portfolio.day(),
            self.portfolio.total_value(),
            self.history.records(),
        )
    }

    /// Listed quotes of one class, in catalog order.
    pub fn quotes(&self, class: AssetClass) -> impl Iterator<Item = &AssetQuote> {
        self.catalog.by_class(class)
    }

    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn balance(&self) -> Decimal {
        self.portfolio.balance()
    }

    pub fn day(&self) -> u32 {
        self.portfolio.day()
    }

    fn listed_price(&self, name: &str) -> Result<(String, Decimal)> {
        self.catalog
            .get(name)
            .map(|quote| (quote.name.clone(), quote.price))
            .ok_or_else(|| Error::AssetNotFound(name.trim().to_string()))
    }
}

/// Collects the moves worth reporting: above the class threshold, at most
/// `per_class` of them per class, in catalog order.
fn significant_movements(catalog: &AssetCatalog, per_class: usize) -> Vec<PriceMovement> {
    AssetClass::ALL
        .into_iter()
        .filter_map(|class| class.significance_threshold().map(|threshold| (class, threshold)))
        .flat_map(|(class, threshold)| {
            catalog
                .by_class(class)
                .filter(move |quote| quote.daily_change.abs() > threshold)
                .take(per_class)
                .map(PriceMovement::from)
        })
        .collect()
}
