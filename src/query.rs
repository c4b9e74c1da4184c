//! Rate queries and their rendered answers

use crate::currency::CurrencyGraph;
use crate::error::Result;
use crate::fraction::Fraction;
use crate::search::best_rate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A request for the best rate from one currency name to another
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub from: String,
    pub to: String,
}

impl Query {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Answer to a single [`Query`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// Source and target are the same currency
    Identity,
    /// Best achievable rate, unreduced
    Rate(Fraction),
    /// Unknown name on either side, or no path between them
    NotFound,
}

impl QueryOutcome {
    pub fn is_found(&self) -> bool {
        !matches!(self, QueryOutcome::NotFound)
    }

    /// Rate as a fraction; identity is `1 / 1`
    pub fn rate(&self) -> Option<Fraction> {
        match self {
            QueryOutcome::Identity => Some(Fraction::from(1)),
            QueryOutcome::Rate(rate) => Some(*rate),
            QueryOutcome::NotFound => None,
        }
    }

    /// Same outcome with the rate in lowest terms
    pub fn reduced(self) -> Self {
        match self {
            QueryOutcome::Rate(rate) => QueryOutcome::Rate(rate.reduced()),
            other => other,
        }
    }
}

impl fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOutcome::Identity => write!(f, "1"),
            QueryOutcome::Rate(rate) => write!(f, "{}", rate),
            QueryOutcome::NotFound => write!(f, "-1"),
        }
    }
}

/// A query together with its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryReport {
    pub from: String,
    pub to: String,
    #[serde(flatten)]
    pub outcome: QueryOutcome,
}

/// How answers are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `1`, `-1` or `<numerator> / <denominator>` per line
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl CurrencyGraph {
    /// Best rate for converting one unit of `from` into `to`
    pub fn query(&self, from: &str, to: &str) -> QueryOutcome {
        let (Some(start), Some(end)) = (self.id_of(from), self.id_of(to)) else {
            log::debug!("Unknown currency in query {} -> {}", from, to);
            return QueryOutcome::NotFound;
        };

        if start == end {
            return QueryOutcome::Identity;
        }

        match best_rate(self, start, end) {
            Some(rate) => QueryOutcome::Rate(rate),
            None => QueryOutcome::NotFound,
        }
    }
}

/// Answer each query in order
pub fn answer_queries(graph: &CurrencyGraph, queries: &[Query]) -> Vec<QueryReport> {
    queries
        .iter()
        .map(|q| QueryReport {
            from: q.from.clone(),
            to: q.to.clone(),
            outcome: graph.query(&q.from, &q.to),
        })
        .collect()
}

/// Render one report as a single output line (without the newline)
pub fn render_report(report: &QueryReport, format: OutputFormat, reduce: bool) -> Result<String> {
    let outcome = if reduce {
        report.outcome.reduced()
    } else {
        report.outcome
    };

    match format {
        OutputFormat::Text => Ok(outcome.to_string()),
        OutputFormat::Json => {
            let report = QueryReport {
                outcome,
                ..report.clone()
            };
            Ok(serde_json::to_string(&report)?)
        }
    }
}
