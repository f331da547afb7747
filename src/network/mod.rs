use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
};

use crate::error::LineError;

mod stop_time;
pub mod validator;

pub use stop_time::StopTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(u64);

impl LineId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StopId(String);

impl StopId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a stop sits on its line: its registration position and scheduled time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledStop {
    pub sequence: usize,
    pub time: StopTime,
}

#[derive(Debug)]
pub struct Line {
    pub id: LineId,
    stops: HashMap<StopId, ScheduledStop>,
}

impl Line {
    /// Builds a line from its timetable, in travel order.
    ///
    /// Times must be strictly increasing and no stop may repeat.
    pub fn new(id: LineId, timetable: Vec<(StopTime, StopId)>) -> Result<Self, LineError> {
        let mut stops = HashMap::with_capacity(timetable.len());
        let mut previous: Option<StopTime> = None;

        for (sequence, (time, stop)) in timetable.into_iter().enumerate() {
            if let Some(previous) = previous
                && previous >= time
            {
                return Err(LineError::NonCausalOrder {
                    stop,
                    time,
                    previous,
                });
            }
            previous = Some(time);

            match stops.entry(stop) {
                Entry::Occupied(e) => return Err(LineError::DuplicateStopInLine(e.key().clone())),
                Entry::Vacant(e) => {
                    e.insert(ScheduledStop { sequence, time });
                }
            }
        }

        Ok(Self { id, stops })
    }

    pub fn stop(&self, id: &StopId) -> Option<&ScheduledStop> {
        self.stops.get(id)
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }
}

/// Registered lines by id. Lines are only ever added, never replaced.
#[derive(Debug, Default)]
pub struct LineRegistry {
    lines: HashMap<LineId, Line>,
}

impl LineRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn contains(&self, id: LineId) -> bool {
        self.lines.contains_key(&id)
    }

    pub fn insert(&mut self, line: Line) -> Result<(), LineError> {
        match self.lines.entry(line.id) {
            Entry::Occupied(_) => Err(LineError::DuplicateLineId(line.id)),
            Entry::Vacant(e) => {
                e.insert(line);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> StopTime {
        StopTime::new(hour, minute).unwrap()
    }

    #[test]
    fn line_records_sequence_and_time() {
        let line = Line::new(
            LineId::new(1),
            vec![(at(8, 0), StopId::new("A")), (at(8, 10), StopId::new("B"))],
        )
        .unwrap();

        assert_eq!(line.stop_count(), 2);
        assert_eq!(
            line.stop(&StopId::new("B")),
            Some(&ScheduledStop {
                sequence: 1,
                time: at(8, 10)
            })
        );
        assert!(line.stop(&StopId::new("C")).is_none());
    }

    #[test]
    fn line_rejects_equal_or_decreasing_times() {
        let equal = Line::new(
            LineId::new(1),
            vec![(at(8, 0), StopId::new("A")), (at(8, 0), StopId::new("B"))],
        );
        assert!(matches!(equal, Err(LineError::NonCausalOrder { .. })));

        let decreasing = Line::new(
            LineId::new(1),
            vec![(at(9, 0), StopId::new("A")), (at(8, 0), StopId::new("B"))],
        );
        assert!(matches!(decreasing, Err(LineError::NonCausalOrder { .. })));
    }

    #[test]
    fn line_rejects_repeated_stop() {
        let line = Line::new(
            LineId::new(1),
            vec![
                (at(8, 0), StopId::new("A")),
                (at(8, 5), StopId::new("B")),
                (at(8, 9), StopId::new("A")),
            ],
        );
        assert_eq!(
            line.unwrap_err(),
            LineError::DuplicateStopInLine(StopId::new("A"))
        );
    }

    #[test]
    fn registry_keeps_first_line_with_an_id() {
        let mut registry = LineRegistry::new();
        let first = Line::new(LineId::new(7), vec![(at(8, 0), StopId::new("A"))]).unwrap();
        let second = Line::new(LineId::new(7), vec![(at(9, 0), StopId::new("B"))]).unwrap();

        registry.insert(first).unwrap();
        assert_eq!(
            registry.insert(second),
            Err(LineError::DuplicateLineId(LineId::new(7)))
        );

        let kept = registry.get(LineId::new(7)).unwrap();
        assert!(kept.stop(&StopId::new("A")).is_some());
        assert!(kept.stop(&StopId::new("B")).is_none());
        assert_eq!(registry.line_count(), 1);
    }
}
