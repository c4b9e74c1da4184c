//! Conversion table and query input
//!
//! Format:
//!
//! ```text
//! 2              <- number of conversion records
//! USD EUR 2      <- one unit of USD buys 2 EUR
//! EUR GBP 3
//! 2              <- number of queries
//! USD GBP        <- query names are whitespace separated tokens
//! GBP USD           and may span lines
//! ```

use crate::currency::CurrencyGraph;
use crate::error::{FxPathError, Result};
use crate::fraction::Quantity;
use crate::query::Query;
use std::io::Read;
use std::str::Lines;

/// One declared direct rate, with the input line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRecord {
    pub from: String,
    pub to: String,
    pub rate: Quantity,
    pub line: usize,
}

/// Everything read from one input document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    pub conversions: Vec<ConversionRecord>,
    pub queries: Vec<Query>,
}

impl ParsedInput {
    /// Build the currency graph from the declared conversions
    pub fn build_graph(&self) -> Result<CurrencyGraph> {
        let mut graph = CurrencyGraph::new();

        for record in &self.conversions {
            graph
                .add_conversion(&record.from, &record.to, record.rate)
                .map_err(|e| match e {
                    FxPathError::ZeroRate { rate, .. } => FxPathError::InvalidRate {
                        line: record.line,
                        rate,
                    },
                    other => other,
                })?;
        }

        log::debug!(
            "Built graph with {} currencies and {} edges",
            graph.len(),
            graph.edge_count()
        );
        Ok(graph)
    }
}

/// Line cursor that remembers 1-based line numbers for error reporting
struct LineCursor<'a> {
    lines: Lines<'a>,
    line: usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
        }
    }

    fn next_line(&mut self, what: &str) -> Result<&'a str> {
        let line = self
            .lines
            .next()
            .ok_or_else(|| FxPathError::UnexpectedEof(format!("expected {}", what)))?;
        self.line += 1;
        Ok(line)
    }

    fn next_count(&mut self, what: &str) -> Result<usize> {
        let line = self.next_line(what)?;
        line.trim().parse::<usize>().map_err(|e| {
            FxPathError::parse(self.line, format!("invalid {} '{}': {}", what, line.trim(), e))
        })
    }
}

/// Parse a complete input document
pub fn parse_input(text: &str) -> Result<ParsedInput> {
    let mut cursor = LineCursor::new(text);

    let conversion_count = cursor.next_count("conversion count")?;
    let mut conversions = Vec::with_capacity(conversion_count);
    for _ in 0..conversion_count {
        let line = cursor.next_line("conversion record")?;
        conversions.push(parse_conversion(line, cursor.line)?);
    }

    let query_count = cursor.next_count("query count")?;
    let mut tokens = cursor.lines.by_ref().flat_map(str::split_whitespace);
    let mut queries = Vec::with_capacity(query_count);
    for i in 0..query_count {
        let (from, to) = match (tokens.next(), tokens.next()) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                return Err(FxPathError::UnexpectedEof(format!(
                    "query {} of {} is incomplete",
                    i + 1,
                    query_count
                )))
            }
        };
        queries.push(Query::new(from, to));
    }

    if tokens.next().is_some() {
        log::warn!("Ignoring input after the last query");
    }

    log::debug!(
        "Parsed {} conversions and {} queries",
        conversions.len(),
        queries.len()
    );

    Ok(ParsedInput {
        conversions,
        queries,
    })
}

/// Read and parse a complete input document from a reader
pub fn read_input<R: Read>(mut reader: R) -> Result<ParsedInput> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_input(&text)
}

fn parse_conversion(line: &str, line_no: usize) -> Result<ConversionRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [from, to, rate] = fields[..] else {
        return Err(FxPathError::parse(
            line_no,
            format!(
                "expected '<currency1> <currency2> <rate>', got '{}'",
                line.trim()
            ),
        ));
    };

    let rate = rate
        .parse::<Quantity>()
        .map_err(|e| FxPathError::parse(line_no, format!("invalid rate '{}': {}", rate, e)))?;
    if rate == 0 {
        return Err(FxPathError::InvalidRate {
            line: line_no,
            rate,
        });
    }

    Ok(ConversionRecord {
        from: from.to_string(),
        to: to.to_string(),
        rate,
        line: line_no,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "2\nUSD EUR 2\nEUR GBP 3\n4\nUSD GBP\nGBP USD\nUSD USD\nUSD JPY\n";

    #[test]
    fn test_parse_sample() {
        let parsed = parse_input(SAMPLE).unwrap();

        assert_eq!(parsed.conversions.len(), 2);
        assert_eq!(
            parsed.conversions[1],
            ConversionRecord {
                from: "EUR".to_string(),
                to: "GBP".to_string(),
                rate: 3,
                line: 3,
            }
        );
        assert_eq!(parsed.queries.len(), 4);
        assert_eq!(parsed.queries[3], Query::new("USD", "JPY"));
    }

    #[test]
    fn test_query_tokens_span_lines() {
        let parsed = parse_input("1\nA B 5\n2\nA\nB B\n   A\n").unwrap();
        assert_eq!(
            parsed.queries,
            vec![Query::new("A", "B"), Query::new("B", "A")]
        );
    }

    #[test]
    fn test_counts_tolerate_whitespace() {
        let parsed = parse_input(" 1 \r\nA B 5\r\n 0\r\n").unwrap();
        assert_eq!(parsed.conversions[0].rate, 5);
        assert!(parsed.queries.is_empty());
    }

    #[test]
    fn test_empty_conversion_table() {
        let parsed = parse_input("0\n1\nUSD EUR\n").unwrap();
        assert!(parsed.conversions.is_empty());
        assert!(parsed.build_graph().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_count() {
        let err = parse_input("two\n").unwrap_err();
        assert!(matches!(err, FxPathError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_malformed_record() {
        let err = parse_input("1\nUSD EUR\n0\n").unwrap_err();
        assert!(matches!(err, FxPathError::ParseError { line: 2, .. }));

        let err = parse_input("1\nUSD EUR 2 extra\n0\n").unwrap_err();
        assert!(matches!(err, FxPathError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_non_numeric_rate() {
        let err = parse_input("1\nUSD EUR 1.5\n0\n").unwrap_err();
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn test_zero_rate() {
        let err = parse_input("2\nUSD EUR 2\nEUR GBP 0\n0\n").unwrap_err();
        assert!(matches!(err, FxPathError::InvalidRate { line: 3, rate: 0 }));
    }

    #[test]
    fn test_missing_records() {
        let err = parse_input("3\nUSD EUR 2\n").unwrap_err();
        assert!(matches!(err, FxPathError::UnexpectedEof(_)));
    }

    #[test]
    fn test_incomplete_query() {
        let err = parse_input("1\nUSD EUR 2\n2\nUSD EUR\nEUR\n").unwrap_err();
        assert!(err.to_string().contains("query 2 of 2"));
    }

    #[test]
    fn test_build_graph_reports_record_line() {
        let parsed = ParsedInput {
            conversions: vec![
                ConversionRecord {
                    from: "USD".to_string(),
                    to: "EUR".to_string(),
                    rate: 2,
                    line: 2,
                },
                ConversionRecord {
                    from: "EUR".to_string(),
                    to: "GBP".to_string(),
                    rate: 0,
                    line: 3,
                },
            ],
            queries: Vec::new(),
        };

        let err = parsed.build_graph().unwrap_err();
        assert!(matches!(err, FxPathError::InvalidRate { line: 3, rate: 0 }));
    }

    #[test]
    fn test_read_input() {
        let parsed = read_input(SAMPLE.as_bytes()).unwrap();
        let graph = parsed.build_graph().unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.edge_count(), 4);
    }
}
