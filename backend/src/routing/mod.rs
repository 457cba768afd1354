//! Ordered route table with literal-before-parameter precedence.
//!
//! Patterns are tried in registration order and the first match wins.
//! Registration refuses duplicates and any pattern that an earlier pattern
//! would capture because it has a parameter at their first differing segment.
//! [`RouteTable::verify`] replays sample paths at startup to prove the table
//! dispatches as intended.

mod pattern;
mod table;

pub use pattern::RouteParams;
pub use table::RouteTable;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("invalid route template `{template}`: {reason}")]
    InvalidTemplate { template: String, reason: &'static str },

    #[error("route `{template}` duplicates already registered `{existing}`")]
    Duplicate { template: String, existing: String },

    #[error("route `{template}` can never match: `{by}` is registered first and captures every path it would")]
    Shadowed { template: String, by: String },

    #[error("route `{template}` is registered after `{by}`, which has a parameter where it has a literal and would win for paths both match")]
    Misordered { template: String, by: String },

    #[error("sample path `{path}` dispatched to {actual:?}, expected `{expected}`")]
    SelfCheck {
        path: String,
        expected: String,
        actual: Option<String>,
    },
}
