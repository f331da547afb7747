use std::str::FromStr;

use itertools::Itertools;

use crate::{
    command::{is_number, is_stop_name, parse_number, tokens},
    error::LineError,
    network::{LineId, StopId, StopTime},
};

/// `<line id> (<H:MM> <stop>)+`
#[derive(Debug, PartialEq, Eq)]
pub struct LineAddition {
    pub id: LineId,
    pub timetable: Vec<(StopTime, StopId)>,
}

fn is_clock(s: &str) -> bool {
    s.split_once(':')
        .is_some_and(|(hour, minute)| is_number(hour) && is_number(minute))
}

impl FromStr for LineAddition {
    type Err = LineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokens(s).ok_or(LineError::UnknownFormat)?;
        let Some((&id, schedule)) = tokens.split_first() else {
            return Err(LineError::UnknownFormat);
        };

        let well_formed = is_number(id)
            && !schedule.is_empty()
            && schedule.len() % 2 == 0
            && schedule
                .iter()
                .tuples::<(_, _)>()
                .all(|(time, stop)| is_clock(time) && is_stop_name(stop));
        if !well_formed {
            return Err(LineError::UnknownFormat);
        }

        let id = LineId::new(parse_number(id)?);
        let timetable = schedule
            .iter()
            .tuples::<(_, _)>()
            .map(|(time, stop)| Ok((time.parse::<StopTime>()?, StopId::new(*stop))))
            .collect::<Result<Vec<_>, LineError>>()?;

        Ok(Self { id, timetable })
    }
}
