use std::{
    collections::{BTreeMap, HashSet, btree_map::Entry},
    fmt,
    ops::{Add, Bound},
    str::FromStr,
};

use tracing::debug;

use crate::error::LineError;

pub mod optimizer;

/// A ticket price in hundredths of the currency unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    pub fn from_minor_units(units: u64) -> Self {
        Self(units)
    }

    pub fn minor_units(&self) -> u64 {
        self.0
    }

    /// How much can still be spent before reaching `limit`, or zero if it is already reached.
    pub fn headroom(self, limit: Price) -> Price {
        Price(limit.0.saturating_sub(self.0))
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.minor_units();
        write!(f, "{}.{:02}", units / 100, units % 100)
    }
}

/// Parses `[0-9]*.[0-9][0-9]`, e.g. `12.50` or `.99`.
impl FromStr for Price {
    type Err = LineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (whole, cents) = s.split_once('.').ok_or(LineError::UnknownFormat)?;
        if cents.len() != 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !cents.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(LineError::UnknownFormat);
        }

        let digits = format!("{whole}{cents}");
        digits
            .parse()
            .map(Price::from_minor_units)
            .map_err(|_| LineError::NumberOverflow(s.to_owned()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tariff {
    pub name: String,
    pub price: Price,
    /// Validity in minutes, always positive.
    pub duration: u64,
}

/// Registered tariffs, keeping only the longest-lasting tariff for each price.
///
/// Every name ever registered stays reserved, including names whose tariff was later
/// superseded or never kept.
#[derive(Debug, Default)]
pub struct TariffCatalog {
    names: HashSet<String>,
    by_price: BTreeMap<Price, Tariff>,
}

impl TariffCatalog {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add(&mut self, tariff: Tariff) -> Result<(), LineError> {
        if self.names.contains(&tariff.name) {
            return Err(LineError::DuplicateTariffName(tariff.name));
        }
        self.names.insert(tariff.name.clone());

        match self.by_price.entry(tariff.price) {
            Entry::Vacant(e) => {
                e.insert(tariff);
            }
            Entry::Occupied(mut e) if e.get().duration < tariff.duration => {
                debug!(
                    price = %tariff.price,
                    replaced = %e.get().name,
                    by = %tariff.name,
                    "longer tariff at same price"
                );
                e.insert(tariff);
            }
            Entry::Occupied(e) => {
                debug!(price = %tariff.price, kept = %e.get().name, "tariff not longer than existing one");
            }
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn get(&self, price: Price) -> Option<&Tariff> {
        self.by_price.get(&price)
    }

    /// Tariffs priced within `[from, to]` in ascending price order; no upper limit if `to` is `None`.
    pub fn priced_between(&self, from: Price, to: Option<Price>) -> impl Iterator<Item = &Tariff> {
        let upper = to.map_or(Bound::Unbounded, Bound::Included);
        let range = if to.is_some_and(|to| to < from) {
            None
        } else {
            Some(self.by_price.range((Bound::Included(from), upper)))
        };

        range.into_iter().flatten().map(|(_, tariff)| tariff)
    }

    /// Distinct prices on offer; superseded tariffs are not counted.
    pub fn price_count(&self) -> usize {
        self.by_price.len()
    }
}
