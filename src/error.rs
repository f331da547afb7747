use crate::network::{LineId, StopId, StopTime};

/// Why a single input line was rejected. Every variant leaves the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("line matches no known command")]
    UnknownFormat,

    #[error("number does not fit in 64 bits: {0}")]
    NumberOverflow(String),

    #[error("line {0} is already registered")]
    DuplicateLineId(LineId),

    #[error("tariff {0:?} is already registered")]
    DuplicateTariffName(String),

    #[error("invalid time (H:MM): {0}")]
    InvalidTimeFormat(String),

    #[error("time {0} is outside the operating window")]
    OutOfRangeTime(StopTime),

    #[error("stop {stop} at {time} does not come after {previous}")]
    NonCausalOrder {
        stop: StopId,
        time: StopTime,
        previous: StopTime,
    },

    #[error("stop {0} appears twice in one line")]
    DuplicateStopInLine(StopId),
}
