//! # fqueue Testkit
//!
//! Test utilities for fqueue.
//!
//! This crate provides:
//! - Temporary queue fixtures and file inspection helpers
//! - Random payload generators and proptest strategies
//! - A crash-simulating storage backend and file tearing helpers
//! - Acceptance scenarios exercising the public queue contract
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fqueue_testkit::prelude::*;
//!
//! #[test]
//! fn drains_in_order() {
//!     let mut tq = TestQueue::with_capacity(0);
//!     tq.push(b"a").unwrap();
//!     assert_eq!(tq.pop().unwrap().index, 1);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod crash;
pub mod fixtures;
pub mod generators;
pub mod scenarios;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::crash::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::scenarios::*;
}

pub use crash::*;
pub use fixtures::*;
pub use generators::*;
pub use scenarios::*;
