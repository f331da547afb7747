use std::{
    fmt,
    io::{BufRead, Write},
};

use anyhow::{Context, Result};
use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::{
    command::{LineAddition, ParsedCommand, RouteQuery, TariffAddition, parse_command},
    error::LineError,
    network::{
        Line, LineRegistry, StopId,
        validator::{RideCheck, validate_ride},
    },
    tariff::{TariffCatalog, optimizer::cheapest_cover},
};

/// The answer printed for a route query.
#[derive(Debug, PartialEq, Eq)]
pub enum Response {
    /// Names of the cheapest tickets covering the ride.
    Tickets(Vec<String>),
    /// The ride is impossible, or no three tickets cover it.
    Invalid,
    Wait(StopId),
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Tickets(names) => write!(f, "! {}", names.iter().join("; ")),
            Response::Invalid => f.write_str(":-|"),
            Response::Wait(stop) => write!(f, ":-( {stop}"),
        }
    }
}

/// Everything registered so far, plus the number of tickets handed out.
#[derive(Debug)]
pub struct Session {
    lines: LineRegistry,
    tariffs: TariffCatalog,
    tickets_sold: u64,
}

impl Session {
    pub fn new() -> Self {
        Self {
            lines: LineRegistry::new(),
            tariffs: TariffCatalog::new(),
            tickets_sold: 0,
        }
    }

    #[cfg(test)]
    pub fn tickets_sold(&self) -> u64 {
        self.tickets_sold
    }

    /// Applies one input line. On error nothing about the session has changed.
    pub fn process(&mut self, text: &str) -> Result<Option<Response>, LineError> {
        match parse_command(text) {
            ParsedCommand::LineAddition(addition) => self.add_line(addition).map(|()| None),
            ParsedCommand::TariffAddition(addition) => self.add_tariff(addition).map(|()| None),
            ParsedCommand::RouteQuery(query) => Ok(Some(self.answer(&query))),
            ParsedCommand::Blank => Ok(None),
            ParsedCommand::Malformed(e) => Err(e),
        }
    }

    fn add_line(&mut self, addition: LineAddition) -> Result<(), LineError> {
        if self.lines.contains(addition.id) {
            return Err(LineError::DuplicateLineId(addition.id));
        }

        let line = Line::new(addition.id, addition.timetable)?;
        debug!(id = %line.id, stops = line.stop_count(), "registered line");
        self.lines.insert(line)
    }

    fn add_tariff(&mut self, addition: TariffAddition) -> Result<(), LineError> {
        let tariff = addition.tariff;
        debug!(name = %tariff.name, price = %tariff.price, minutes = tariff.duration, "registering tariff");
        self.tariffs.add(tariff)
    }

    fn answer(&mut self, query: &RouteQuery) -> Response {
        let minutes = match validate_ride(&self.lines, &query.ride) {
            RideCheck::Invalid => return Response::Invalid,
            RideCheck::NeedsWait(stop) => return Response::Wait(stop),
            RideCheck::Valid { minutes } => minutes,
        };

        // Both the departure and the arrival minute must be covered.
        let required = minutes + 1;
        let Some(tickets) = cheapest_cover(&self.tariffs, required) else {
            debug!(required, "no ticket combination covers ride");
            return Response::Invalid;
        };

        debug!(required, price = %tickets.total_price, count = tickets.tariffs.len(), "sold tickets");
        self.tickets_sold += tickets.tariffs.len() as u64;
        Response::Tickets(tickets.tariffs.iter().map(|t| t.name.clone()).collect())
    }

    /// Processes every line of `input`, writing answers to `out` and rejected lines to `err`.
    ///
    /// Finishes by writing the number of tickets sold to `out`, and returns it.
    pub fn run<R: BufRead, W: Write, E: Write>(
        &mut self,
        mut input: R,
        mut out: W,
        mut err: E,
    ) -> Result<u64> {
        let mut buf = Vec::new();
        let mut line_number = 0usize;

        loop {
            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .context("reading input")?;
            if read == 0 {
                break;
            }
            line_number += 1;

            let raw = String::from_utf8_lossy(&buf);
            let text = raw.strip_suffix('\n').unwrap_or(&raw);
            let text = text.strip_suffix('\r').unwrap_or(text);

            match self.process(text) {
                Ok(Some(response)) => writeln!(out, "{response}")?,
                Ok(None) => {}
                Err(e) => {
                    warn!(line = line_number, "{e}");
                    writeln!(err, "Error in line {line_number}: {text}")?;
                }
            }
        }

        writeln!(out, "{}", self.tickets_sold)?;
        out.flush()?;
        err.flush()?;

        info!(
            lines = line_number,
            transit_lines = self.lines.line_count(),
            tariffs = self.tariffs.price_count(),
            tickets_sold = self.tickets_sold,
            "finished input"
        );
        Ok(self.tickets_sold)
    }
}
