use std::str::FromStr;

use crate::{
    command::{is_number, parse_number},
    error::LineError,
    tariff::{Price, Tariff},
};

/// `<name> <price> <minutes>`, where the name may contain spaces.
#[derive(Debug, PartialEq, Eq)]
pub struct TariffAddition {
    pub tariff: Tariff,
}

fn is_tariff_name(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphabetic() || b == b' ')
}

impl FromStr for TariffAddition {
    type Err = LineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (head, duration) = s.rsplit_once(' ').ok_or(LineError::UnknownFormat)?;
        let (name, price) = head
            .trim_end_matches(' ')
            .rsplit_once(' ')
            .ok_or(LineError::UnknownFormat)?;
        let name = name.trim_end_matches(' ');

        if !is_tariff_name(name) || !is_number(duration) || duration.starts_with('0') {
            return Err(LineError::UnknownFormat);
        }

        let price: Price = price.parse()?;
        let duration = parse_number(duration)?;

        Ok(Self {
            tariff: Tariff {
                name: name.to_owned(),
                price,
                duration,
            },
        })
    }
}
