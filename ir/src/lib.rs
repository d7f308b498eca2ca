#[macro_use]
extern crate derive_new;
#[allow(unused_imports)]
#[macro_use]
extern crate log;

#[macro_use]
mod macros;
pub mod node;
pub mod ops;

/// A Smallvec instantiation with 4 embeddable values.
///
/// Used for node inputs and outputs, and for axes lists.
pub type TVec<T> = smallvec::SmallVec<[T; 4]>;

/// Result type of every fallible front-end operation.
pub type FrontResult<T> = anyhow::Result<T>;

pub use anyhow;
pub use smallvec;

pub mod prelude {
    pub use crate::node::Node;
    pub use crate::ops::{OpAttrs, OpStat};
    pub use crate::tvec;
    pub use crate::{FrontResult, TVec};
}

pub mod internal {
    pub use crate::ops::normalize_optional_sequence;
    pub use crate::ops::squeeze::Squeeze;
    pub use crate::ops::unsqueeze::Unsqueeze;
    pub use crate::prelude::*;
    pub use anyhow::{Context as _, bail, ensure, format_err};
    pub use std::borrow::Cow;
    pub use std::fmt;
}

#[cfg(test)]
#[allow(dead_code)]
fn setup_test_logger() {
    let _ = env_logger::Builder::from_env("MOFRONT_LOG").try_init();
}
