#![deny(missing_docs)]
// the README example uses real threads, which loom only allows inside a model
#![cfg_attr(not(feature = "loom"), doc = include_str!("../README.md"))]
#![cfg_attr(feature = "loom", doc = "A bounded, thread-safe FIFO queue.")]

// loom integration
#[doc(hidden)]
macro_rules! cfg_loom {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "loom")]
            $item
        )*
    };
}
#[doc(hidden)]
macro_rules! cfg_not_loom {
    ($($item:item)*) => {
        $(
            #[cfg(not(feature = "loom"))]
            $item
        )*
    };
}

#[doc(hidden)]
mod sync;
//loom integration finished.

/// A module containing the error types used by the library.
pub mod error;

/// A module containing the mutex and condition variable based queue.
pub mod queue;

mod util;

#[doc(inline)]
pub use queue::{BoundedBlockingQueue, UNBOUNDED};
