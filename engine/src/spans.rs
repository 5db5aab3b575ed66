//! Span constructors for engine operations.
//!
//! Using one span name and field set for every operation makes it easy to
//! filter and correlate logs per account.

use tracing::{info_span, Span};

/// Span covering one public engine operation on behalf of `account`.
pub fn operation_span(op: &'static str, account: &x1_types::Address) -> Span {
    info_span!("x1_op", op, account = %account)
}
