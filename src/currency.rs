//! Currency graph
//!
//! Currencies are nodes in an arena owned by [`CurrencyGraph`]. Edges refer to
//! their target by [`CurrencyId`], never by reference, so the graph can be
//! borrowed freely while queries run.

use crate::error::{FxPathError, Result};
use crate::fraction::{Fraction, Quantity};
use num_traits::Inv;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Stable handle to a currency inside a [`CurrencyGraph`]
///
/// Handles are only issued by the graph itself:
///
/// ```compile_fail
/// use rusty_fxpath::currency::CurrencyId;
///
/// let forged: CurrencyId = serde_json::from_str("3").unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CurrencyId(pub(crate) usize);

impl CurrencyId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for CurrencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Directed edge: one unit of the source buys `rate` units of `target`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub target: CurrencyId,
    pub rate: Fraction,
}

/// A named node and its outgoing conversions
#[derive(Debug, Clone)]
pub struct Currency {
    name: String,
    /// Outgoing edges keyed by target; iteration follows registration order
    conversions: BTreeMap<CurrencyId, Conversion>,
}

impl Currency {
    fn new(name: String) -> Self {
        Self {
            name,
            conversions: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outgoing conversions in ascending target order
    pub fn conversions(&self) -> impl Iterator<Item = &Conversion> {
        self.conversions.values()
    }

    /// Direct rate to `target`, if one was declared
    pub fn rate_to(&self, target: CurrencyId) -> Option<Fraction> {
        self.conversions.get(&target).map(|c| c.rate)
    }
}

/// Registry owning every currency node
#[derive(Debug, Clone, Default)]
pub struct CurrencyGraph {
    nodes: Vec<Currency>,
    index: HashMap<String, CurrencyId>,
}

impl CurrencyGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a currency by name, registering it if unseen
    pub fn get_or_insert(&mut self, name: &str) -> CurrencyId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }

        let id = CurrencyId(self.nodes.len());
        self.nodes.push(Currency::new(name.to_string()));
        self.index.insert(name.to_string(), id);
        log::trace!("Registered currency {} as {}", name, id);
        id
    }

    /// Declare that one unit of `from` buys `rate` units of `to`.
    ///
    /// Inserts the reverse edge with rate `1/rate` as well. Declaring the same
    /// pair again replaces both directions.
    pub fn add_conversion(&mut self, from: &str, to: &str, rate: Quantity) -> Result<()> {
        if rate == 0 {
            return Err(FxPathError::ZeroRate {
                from: from.to_string(),
                to: to.to_string(),
                rate,
            });
        }

        let from_id = self.get_or_insert(from);
        let to_id = self.get_or_insert(to);
        let forward = Fraction::from(rate);

        if self.nodes[from_id.0].conversions.contains_key(&to_id) {
            log::warn!("Conversion {} -> {} redeclared, replacing", from, to);
        }

        self.nodes[from_id.0].conversions.insert(
            to_id,
            Conversion {
                target: to_id,
                rate: forward,
            },
        );
        self.nodes[to_id.0].conversions.insert(
            from_id,
            Conversion {
                target: from_id,
                rate: forward.inv(),
            },
        );

        Ok(())
    }

    /// Id of a registered currency
    pub fn id_of(&self, name: &str) -> Option<CurrencyId> {
        self.index.get(name).copied()
    }

    /// Id of a currency that must exist
    pub fn require(&self, name: &str) -> Result<CurrencyId> {
        self.id_of(name)
            .ok_or_else(|| FxPathError::UnknownCurrency(name.to_string()))
    }

    /// Node for a handle issued by this graph
    pub fn currency(&self, id: CurrencyId) -> &Currency {
        &self.nodes[id.0]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of currencies
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of directed edges, inverses included
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.conversions.len()).sum()
    }

    /// Currency names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name())
    }
}
