use tracing::trace;

use crate::network::{LineId, LineRegistry, ScheduledStop, StopId, StopTime};

/// One segment of a ride: stay on `line` until `to`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leg {
    /// `None` when the requested id is too large to name any registered line.
    pub line: Option<LineId>,
    pub to: StopId,
}

/// A ride starting at `origin`, with at least one leg.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ride {
    pub origin: StopId,
    pub legs: Vec<Leg>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RideCheck {
    Invalid,
    /// The rider arrives before the next departure and has to wait at this stop.
    NeedsWait(StopId),
    /// The ride is feasible and lasts this many minutes from first departure to last arrival.
    Valid { minutes: u64 },
}

/// Checks a ride against the registered timetables.
///
/// Each leg must run forward along its line between two of its stops, and no leg may depart
/// before the previous one arrives. A ride that is otherwise feasible but has a gap between
/// legs reports the first stop where the rider would wait.
pub fn validate_ride(lines: &LineRegistry, ride: &Ride) -> RideCheck {
    let mut first_departure: Option<StopTime> = None;
    let mut last_arrival: Option<StopTime> = None;
    let mut wait_at: Option<&StopId> = None;
    let mut from = &ride.origin;

    for leg in &ride.legs {
        let Some((start, end)) = board(lines, leg.line, from, &leg.to) else {
            trace!(line = ?leg.line, %from, to = %leg.to, "leg not served by line");
            return RideCheck::Invalid;
        };

        if let Some(arrival) = last_arrival {
            if arrival > start.time {
                trace!(%from, %arrival, departure = %start.time, "connection departs before arrival");
                return RideCheck::Invalid;
            }
            if arrival < start.time && wait_at.is_none() {
                wait_at = Some(from);
            }
        }

        first_departure.get_or_insert(start.time);
        last_arrival = Some(end.time);
        from = &leg.to;
    }

    match (wait_at, first_departure, last_arrival) {
        (Some(stop), _, _) => RideCheck::NeedsWait(stop.clone()),
        (None, Some(departure), Some(arrival)) => RideCheck::Valid {
            minutes: departure.minutes_between(arrival),
        },
        _ => RideCheck::Invalid,
    }
}

fn board<'a>(
    lines: &'a LineRegistry,
    line: Option<LineId>,
    from: &StopId,
    to: &StopId,
) -> Option<(&'a ScheduledStop, &'a ScheduledStop)> {
    let line = lines.get(line?)?;
    let start = line.stop(from)?;
    let end = line.stop(to)?;

    (start.sequence < end.sequence).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Line;
    use rstest::{fixture, rstest};

    fn timetable(stops: &[(u32, u32, &str)]) -> Vec<(StopTime, StopId)> {
        stops
            .iter()
            .map(|&(h, m, s)| (StopTime::new(h, m).unwrap(), StopId::new(s)))
            .collect()
    }

    fn ride(origin: &str, legs: &[(u64, &str)]) -> Ride {
        Ride {
            origin: StopId::new(origin),
            legs: legs
                .iter()
                .map(|&(line, to)| Leg {
                    line: Some(LineId::new(line)),
                    to: StopId::new(to),
                })
                .collect(),
        }
    }

    #[fixture]
    fn lines() -> LineRegistry {
        let mut lines = LineRegistry::new();
        for (id, stops) in [
            (1, timetable(&[(8, 0, "A"), (8, 10, "B"), (8, 20, "C")])),
            (2, timetable(&[(8, 10, "B"), (8, 30, "D")])),
            (3, timetable(&[(8, 25, "C"), (8, 40, "E")])),
            (4, timetable(&[(8, 5, "B"), (8, 15, "F")])),
            (5, timetable(&[(8, 45, "E"), (9, 0, "G")])),
        ] {
            lines.insert(Line::new(LineId::new(id), stops).unwrap()).unwrap();
        }
        lines
    }

    #[rstest]
    fn single_leg_duration(lines: LineRegistry) {
        assert_eq!(
            validate_ride(&lines, &ride("A", &[(1, "C")])),
            RideCheck::Valid { minutes: 20 }
        );
    }

    #[rstest]
    fn connecting_legs_on_time(lines: LineRegistry) {
        assert_eq!(
            validate_ride(&lines, &ride("A", &[(1, "B"), (2, "D")])),
            RideCheck::Valid { minutes: 30 }
        );
    }

    #[rstest]
    #[case::unknown_line(ride("A", &[(9, "B")]))]
    #[case::stop_not_on_line(ride("A", &[(2, "D")]))]
    #[case::destination_not_on_line(ride("A", &[(1, "D")]))]
    #[case::unknown_line_id_size(Ride {
        origin: StopId::new("A"),
        legs: vec![Leg { line: None, to: StopId::new("B") }],
    })]
    #[case::backwards(ride("C", &[(1, "A")]))]
    #[case::stays_in_place(ride("B", &[(1, "B")]))]
    #[case::departs_before_arrival(ride("A", &[(1, "B"), (4, "F")]))]
    fn invalid_rides(lines: LineRegistry, #[case] ride: Ride) {
        assert_eq!(validate_ride(&lines, &ride), RideCheck::Invalid);
    }

    #[rstest]
    fn reports_first_wait(lines: LineRegistry) {
        assert_eq!(
            validate_ride(&lines, &ride("A", &[(1, "C"), (3, "E"), (5, "G")])),
            RideCheck::NeedsWait(StopId::new("C"))
        );
    }

    #[rstest]
    fn later_invalid_leg_beats_wait(lines: LineRegistry) {
        assert_eq!(
            validate_ride(&lines, &ride("A", &[(1, "C"), (3, "E"), (1, "A")])),
            RideCheck::Invalid
        );
    }
}
