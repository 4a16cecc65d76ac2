//! Convenient re-exports for common use.

pub use crate::codec::{CodecConfig, TolerantCodec};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::numeric::{FlexibleInt, FlexibleTimestamp, as_flexible_i64};
