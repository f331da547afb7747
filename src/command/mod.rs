use crate::error::LineError;

pub mod line;
pub mod query;
pub mod tariff;

pub use line::LineAddition;
pub use query::RouteQuery;
pub use tariff::TariffAddition;

/// One input line, classified and parsed into typed data.
#[derive(Debug, PartialEq, Eq)]
pub enum ParsedCommand {
    LineAddition(LineAddition),
    TariffAddition(TariffAddition),
    RouteQuery(RouteQuery),
    Blank,
    Malformed(LineError),
}

/// Classifies a line, trying line addition, tariff addition and route query in that order.
///
/// A line that has the shape of a command but carries a bad value (a time outside the
/// operating window, an oversized number) is `Malformed` with that reason rather than
/// `UnknownFormat`.
pub fn parse_command(text: &str) -> ParsedCommand {
    if text.is_empty() {
        return ParsedCommand::Blank;
    }

    let parsers: [fn(&str) -> Result<ParsedCommand, LineError>; 3] = [
        |s| s.parse().map(ParsedCommand::LineAddition),
        |s| s.parse().map(ParsedCommand::TariffAddition),
        |s| s.parse().map(ParsedCommand::RouteQuery),
    ];

    for parse in parsers {
        match parse(text) {
            Ok(command) => return command,
            Err(LineError::UnknownFormat) => continue,
            Err(e) => return ParsedCommand::Malformed(e),
        }
    }

    ParsedCommand::Malformed(LineError::UnknownFormat)
}

/// Splits on runs of spaces. Lines with leading or trailing spaces have no tokens.
fn tokens(s: &str) -> Option<Vec<&str>> {
    if s.is_empty() || s.starts_with(' ') || s.ends_with(' ') {
        return None;
    }
    Some(s.split(' ').filter(|t| !t.is_empty()).collect())
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_stop_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphabetic() || b == b'_' || b == b'^')
}

/// Parses a token already known to be all digits.
fn parse_number(s: &str) -> Result<u64, LineError> {
    s.parse()
        .map_err(|_| LineError::NumberOverflow(s.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_line_is_blank() {
        assert_eq!(parse_command(""), ParsedCommand::Blank);
    }

    #[rstest]
    #[case("1 8:00 A 8:10 B")]
    #[case("42 8:00 A")]
    #[case("1  8:00   A 8:10 B")]
    fn classifies_line_additions(#[case] text: &str) {
        assert!(matches!(parse_command(text), ParsedCommand::LineAddition(_)));
    }

    #[rstest]
    #[case("Economy 1.50 20")]
    #[case("Half day pass 12.00 240")]
    #[case("Cheap .50 5")]
    fn classifies_tariff_additions(#[case] text: &str) {
        assert!(matches!(parse_command(text), ParsedCommand::TariffAddition(_)));
    }

    #[rstest]
    #[case("? A 1 B")]
    #[case("? A 1 B 2 C")]
    fn classifies_route_queries(#[case] text: &str) {
        assert!(matches!(parse_command(text), ParsedCommand::RouteQuery(_)));
    }

    #[rstest]
    #[case(" ")]
    #[case("hello")]
    #[case("1")]
    #[case("1 8:00")]
    #[case("1 8:00 A 8:10")]
    #[case(" 1 8:00 A")]
    #[case("1 8:00 A ")]
    #[case("1 8:00 A1")]
    #[case("1 A 8:00")]
    #[case("? A")]
    #[case("? A 1")]
    #[case("? A B C")]
    #[case("Economy 1.5 20")]
    #[case("Economy 1.50 0")]
    #[case("Economy 1.50 020")]
    #[case("Economy2 1.50 20")]
    #[case("1.50 20")]
    fn rejects_unknown_format(#[case] text: &str) {
        assert_eq!(
            parse_command(text),
            ParsedCommand::Malformed(LineError::UnknownFormat)
        );
    }

    #[test]
    fn bad_time_is_reported_as_such() {
        assert_eq!(
            parse_command("1 8:00 A 25:00 B"),
            ParsedCommand::Malformed(LineError::InvalidTimeFormat("25:00".into()))
        );
        assert!(matches!(
            parse_command("1 5:00 A 8:10 B"),
            ParsedCommand::Malformed(LineError::OutOfRangeTime(_))
        ));
    }

    #[test]
    fn oversized_numbers_overflow() {
        assert!(matches!(
            parse_command("123456789012345678901234 8:00 A"),
            ParsedCommand::Malformed(LineError::NumberOverflow(_))
        ));
        assert!(matches!(
            parse_command("Forever 1.00 123456789012345678901234"),
            ParsedCommand::Malformed(LineError::NumberOverflow(_))
        ));
    }
}
