//! # rusty-fxpath
//!
//! Best currency conversion rates over a graph of direct exchange rates.
//!
//! Every declared rate `A -> B` also yields the inverse `B -> A`. Rates are
//! exact fractions, and the best rate between two currencies is found with a
//! Dijkstra search that multiplies rates along a path and prefers the larger
//! product.
//!
//! ## Example
//!
//! ```rust
//! use rusty_fxpath::prelude::*;
//!
//! let mut graph = CurrencyGraph::new();
//! graph.add_conversion("USD", "EUR", 2).unwrap();
//! graph.add_conversion("EUR", "GBP", 3).unwrap();
//!
//! assert_eq!(graph.query("USD", "GBP"), QueryOutcome::Rate(Fraction::new(6, 1)));
//! assert_eq!(graph.query("GBP", "USD").to_string(), "1 / 6");
//! assert_eq!(graph.query("USD", "JPY").to_string(), "-1");
//! ```

pub mod currency;
pub mod error;
pub mod fraction;
pub mod input;
pub mod query;
pub mod search;

pub mod prelude {
    //! Commonly used types and functions
    pub use crate::currency::{Conversion, Currency, CurrencyGraph, CurrencyId};
    pub use crate::error::{FxPathError, Result};
    pub use crate::fraction::{Fraction, Quantity};
    pub use crate::input::{parse_input, read_input, ParsedInput};
    pub use crate::query::{answer_queries, render_report, OutputFormat, Query, QueryOutcome, QueryReport};
    pub use crate::search::best_rate;
}
