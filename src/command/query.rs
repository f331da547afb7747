use std::str::FromStr;

use itertools::Itertools;

use crate::{
    command::{is_number, is_stop_name, tokens},
    error::LineError,
    network::{
        LineId, StopId,
        validator::{Leg, Ride},
    },
};

/// `? <stop> (<line id> <stop>)+`
#[derive(Debug, PartialEq, Eq)]
pub struct RouteQuery {
    pub ride: Ride,
}

impl FromStr for RouteQuery {
    type Err = LineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokens(s).ok_or(LineError::UnknownFormat)?;
        let ["?", origin, legs @ ..] = tokens.as_slice() else {
            return Err(LineError::UnknownFormat);
        };

        let well_formed = is_stop_name(origin)
            && !legs.is_empty()
            && legs.len() % 2 == 0
            && legs
                .iter()
                .tuples::<(_, _)>()
                .all(|(line, stop)| is_number(line) && is_stop_name(stop));
        if !well_formed {
            return Err(LineError::UnknownFormat);
        }

        let legs = legs
            .iter()
            .tuples::<(_, _)>()
            .map(|(line, stop)| Leg {
                // An id past u64 can never have been registered, so the ride is simply invalid.
                line: line.parse().ok().map(LineId::new),
                to: StopId::new(*stop),
            })
            .collect();

        Ok(Self {
            ride: Ride {
                origin: StopId::new(*origin),
                legs,
            },
        })
    }
}
