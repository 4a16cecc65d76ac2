//! Flexible numeric values.
//!
//! Upstream producers disagree on how to encode integer fields such as
//! `created` timestamps or token counts: some emit `1748682323`, some
//! `1748682323.3797884`, some `"1748682323"`. This module reconciles all of
//! those into a single `i64`.
//!
//! - [`FlexibleInt`] is the field type; it decodes through the
//!   [`CustomScalarCodec`] hook and encodes as a bare integer literal.
//! - [`as_flexible_i64`] applies the same rules to plain `i64` fields via
//!   `#[serde(with = "...")]`.
//! - [`ScalarToken`] and [`TokenKind`] describe what the decoder saw.

pub mod as_flexible_i64;
mod error;
mod flexible;
mod parse;
mod scalar;

pub use error::{NumericError, TokenKind};
pub use flexible::{FlexibleInt, FlexibleTimestamp};
pub use parse::{parse_numeric_str, reconcile_i64, truncate_f64};
pub use scalar::{CustomScalarCodec, ScalarToken, ScalarVisitor, deserialize_scalar};
