use tracing::trace;

use crate::tariff::{Price, Tariff, TariffCatalog};

/// Most tickets a single ride may be covered with.
pub const MAX_TICKETS: usize = 3;

/// The cheapest tickets found for a ride, in the order the search chose them.
#[derive(Debug, PartialEq, Eq)]
pub struct TicketSet<'a> {
    pub tariffs: Vec<&'a Tariff>,
    pub total_price: Price,
}

#[derive(Clone, Debug, Default)]
struct Branch<'a> {
    tariffs: Vec<&'a Tariff>,
    total_price: Price,
    total_duration: u64,
}

impl<'a> Branch<'a> {
    fn extend(&self, tariff: &'a Tariff) -> Self {
        let mut tariffs = self.tariffs.clone();
        tariffs.push(tariff);
        Self {
            tariffs,
            total_price: self.total_price + tariff.price,
            total_duration: self.total_duration.saturating_add(tariff.duration),
        }
    }

    fn last_price(&self) -> Price {
        self.tariffs.last().map(|t| t.price).unwrap_or_default()
    }
}

/// Finds the cheapest combination of at most [`MAX_TICKETS`] tariffs lasting `required` minutes
/// in total.
///
/// Tariffs may repeat. Combinations are explored in non-decreasing price order and a branch is
/// only extended with prices that could still beat the best total found so far, so among
/// equally cheap combinations the first one reached wins.
pub fn cheapest_cover(catalog: &TariffCatalog, required: u64) -> Option<TicketSet<'_>> {
    let best = branch_off(catalog, required, Branch::default(), None)?;

    (!best.tariffs.is_empty()).then(|| TicketSet {
        tariffs: best.tariffs,
        total_price: best.total_price,
    })
}

fn branch_off<'a>(
    catalog: &'a TariffCatalog,
    required: u64,
    branch: Branch<'a>,
    best: Option<Branch<'a>>,
) -> Option<Branch<'a>> {
    if branch.tariffs.len() >= MAX_TICKETS || branch.total_duration >= required {
        if branch.total_duration < required {
            return best;
        }

        return match best {
            Some(best) if best.total_price <= branch.total_price => Some(best),
            _ => {
                trace!(
                    price = %branch.total_price,
                    minutes = branch.total_duration,
                    tickets = branch.tariffs.len(),
                    "new cheapest cover"
                );
                Some(branch)
            }
        };
    }

    let bound = best
        .as_ref()
        .map(|best| branch.total_price.headroom(best.total_price));

    catalog
        .priced_between(branch.last_price(), bound)
        .fold(best, |best, tariff| {
            branch_off(catalog, required, branch.extend(tariff), best)
        })
}
