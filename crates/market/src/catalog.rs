// In crates/market/src/catalog.rs

use crate::{Error, Result};
use core_types::{AssetClass, AssetQuote, PriceSource};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// No quote is ever allowed to fall below one cent.
pub const MIN_TRADABLE_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// The authoritative store of live quotes for every tradable instrument.
///
/// Quotes keep their insertion order (which is also their reporting order),
/// and a single case-insensitive index maps every name to its slot. Names
/// must be unique across *all* classes, so a lookup can never be ambiguous.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    quotes: Vec<AssetQuote>,
    index: HashMap<String, usize>,
}

impl AssetCatalog {
    /// Builds a catalog, rejecting duplicate names and unusable quotes.
    pub fn new(quotes: Vec<AssetQuote>) -> Result<Self> {
        let mut index: HashMap<String, usize> = HashMap::with_capacity(quotes.len());

        for (slot, quote) in quotes.iter().enumerate() {
            validate(quote)?;
            let key = normalize(&quote.name);
            if let Some(&existing) = index.get(&key) {
                return Err(Error::DuplicateAsset {
                    name: quote.name.clone(),
                    first: quotes[existing].class,
                    second: quote.class,
                });
            }
            index.insert(key, slot);
        }

        Ok(Self { quotes, index })
    }

    /// The fixed reference data every new simulation starts from.
    pub fn with_default_assets() -> Result<Self> {
        Self::new(default_quotes())
    }

    /// Case-insensitive lookup across all classes.
    pub fn get(&self, name: &str) -> Option<&AssetQuote> {
        self.index.get(&normalize(name)).map(|&slot| &self.quotes[slot])
    }

    /// Case-insensitive lookup restricted to one class.
    pub fn get_in(&self, class: AssetClass, name: &str) -> Option<&AssetQuote> {
        self.get(name).filter(|quote| quote.class == class)
    }

    /// All quotes of one class, in catalog order.
    pub fn by_class(&self, class: AssetClass) -> impl Iterator<Item = &AssetQuote> {
        self.quotes.iter().filter(move |quote| quote.class == class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetQuote> {
        self.quotes.iter()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Mutable access for the price simulator. Names are never touched
    /// through this, so the index stays valid.
    pub(crate) fn quotes_mut(&mut self) -> &mut [AssetQuote] {
        &mut self.quotes
    }
}

impl PriceSource for AssetCatalog {
    fn price_of(&self, name: &str) -> Option<Decimal> {
        self.get(name).map(|quote| quote.price)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn validate(quote: &AssetQuote) -> Result<()> {
    let reason = if quote.name.trim().is_empty() {
        Some("name is empty")
    } else if quote.price < MIN_TRADABLE_PRICE {
        Some("price is below the minimum tradable price")
    } else if !quote.volatility.is_finite() || quote.volatility < 0.0 {
        Some("volatility must be a finite, non-negative fraction")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidQuote {
            name: quote.name.clone(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

fn default_quotes() -> Vec<AssetQuote> {
    let equities = [
        ("Tesla", dec!(750.0), 0.05),
        ("Apple", dec!(145.0), 0.035),
        ("Microsoft", dec!(300.0), 0.032),
        ("Amazon", dec!(3400.0), 0.042),
        ("Google", dec!(2800.0), 0.038),
        ("Facebook", dec!(330.0), 0.045),
        ("Berkshire Hathaway", dec!(420000.0), 0.028),
        ("Johnson & Johnson", dec!(175.0), 0.025),
        ("Visa", dec!(230.0), 0.030),
        ("Nvidia", dec!(670.0), 0.055),
    ];
    let commodities = [("Gold", dec!(1800.0), 0.02), ("Silver", dec!(25.0), 0.03)];
    let crypto = [
        ("Bitcoin", dec!(103972.67), 0.15),
        ("Ethereum", dec!(2520.55), 0.18),
        ("Tether", dec!(1.00), 0.01),
        ("XRP", dec!(2.39), 0.22),
        ("BNB", dec!(647.41), 0.20),
        ("Solana", dec!(171.34), 0.25),
        ("USD Coin", dec!(0.9997), 0.008),
        ("Dogecoin", dec!(0.2243), 0.30),
        ("Cardano", dec!(0.7619), 0.22),
        ("Tron", dec!(0.2729), 0.24),
    ];

    tagged(&equities, AssetClass::Equity)
        .chain(tagged(&commodities, AssetClass::Commodity))
        .chain(tagged(&crypto, AssetClass::Crypto))
        .collect()
}

fn tagged<'a>(
    seeds: &'a [(&'static str, Decimal, f64)],
    class: AssetClass,
) -> impl Iterator<Item = AssetQuote> + 'a {
    seeds
        .iter()
        .map(move |&(name, price, volatility)| AssetQuote::new(name, class, price, volatility))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_every_class() {
        let catalog = AssetCatalog::with_default_assets().unwrap();
        assert_eq!(catalog.len(), 22);
        assert_eq!(catalog.by_class(AssetClass::Equity).count(), 10);
        assert_eq!(catalog.by_class(AssetClass::Commodity).count(), 2);
        assert_eq!(catalog.by_class(AssetClass::Crypto).count(), 10);
    }

    #[test]
    fn lookups_ignore_case_and_return_canonical_names() {
        let catalog = AssetCatalog::with_default_assets().unwrap();
        let quote = catalog.get("bItCoIn").unwrap();
        assert_eq!(quote.name, "Bitcoin");
        assert_eq!(quote.class, AssetClass::Crypto);
        assert_eq!(catalog.price_of("johnson & johnson"), Some(dec!(175.0)));
        assert!(catalog.get("Dogecoin ").is_some());
        assert!(catalog.get("Pepe").is_none());
    }

    #[test]
    fn class_scoped_lookup_does_not_leak_across_classes() {
        let catalog = AssetCatalog::with_default_assets().unwrap();
        assert!(catalog.get_in(AssetClass::Commodity, "gold").is_some());
        assert!(catalog.get_in(AssetClass::Equity, "gold").is_none());
    }

    #[test]
    fn class_order_is_preserved() {
        let catalog = AssetCatalog::with_default_assets().unwrap();
        let names: Vec<&str> = catalog
            .by_class(AssetClass::Commodity)
            .map(|q| q.name.as_str())
            .collect();
        assert_eq!(names, vec!["Gold", "Silver"]);
        assert_eq!(catalog.iter().next().unwrap().name, "Tesla");
    }

    #[test]
    fn cross_class_collisions_are_rejected() {
        let err = AssetCatalog::new(vec![
            AssetQuote::new("Gold", AssetClass::Commodity, dec!(1800), 0.02),
            AssetQuote::new("GOLD", AssetClass::Crypto, dec!(1), 0.2),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateAsset {
                name: "GOLD".to_string(),
                first: AssetClass::Commodity,
                second: AssetClass::Crypto,
            }
        );
    }

    #[test]
    fn unusable_quotes_are_rejected() {
        let zero_price = AssetCatalog::new(vec![AssetQuote::new("Penny", AssetClass::Equity, dec!(0), 0.1)]);
        assert!(matches!(zero_price, Err(Error::InvalidQuote { .. })));

        let bad_vol = AssetCatalog::new(vec![AssetQuote::new("Nan", AssetClass::Equity, dec!(1), f64::NAN)]);
        assert!(matches!(bad_vol, Err(Error::InvalidQuote { .. })));
    }
}
