//! A Red-Black tree product index for Rust.
//!
//! This crate provides [`RbTreeMap`], an ordered map backed by a classical
//! Red-Black binary search tree, together with a small product-catalog
//! layer ([`Product`], [`ProductCatalog`]) that loads delimited-text
//! records and indexes them by id.
//!
//! The tree maintains the textbook color invariants (black root, no red
//! node with a red child, equal black-height on every path) through local
//! rotations and recolorings applied bottom-up after each insertion, which
//! bounds the height to 2·log₂(n + 1) and keeps `insert` and `get` at
//! O(log n) for any insertion order. Each invariant can be audited at any
//! time through [`RbTreeMap::is_valid`] and its four sub-checks.
//!
//! # Example
//!
//! ```
//! use cinnabar_tree::RbTreeMap;
//!
//! let mut index = RbTreeMap::new();
//! index.insert("1001", 29.99);
//! index.insert("1002", 999.99);
//! index.insert("1003", 14.99);
//!
//! assert_eq!(index.get(&"1002"), Some(&999.99));
//! assert_eq!(index.len(), 3);
//! assert!(index.is_valid());
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible core** - the tree itself only requires `alloc`
//! - **Arena storage** - nodes live in one contiguous `Vec` and link to
//!   each other (parent included) by index, so there are no pointer cycles
//!   and no per-node heap allocation
//! - **Auditable invariants** - every structural rule is an independently
//!   callable check
//! - **`std` feature** (default) - enables the file-loading catalog layer
//!
//! # Implementation
//!
//! The tree is the classical parent-pointer variant: insertion is a plain
//! BST descent that attaches a red node, followed by a fix-up walk that
//! climbs parent links and dispatches on one of four local configurations
//! (red uncle, triangle, line, root) until the invariants hold again.
//! Keys that are already present have their value replaced in place with
//! no structural change. Removal is not offered; the map is an
//! insert-and-look-up index.

#![cfg_attr(not(feature = "std"), no_std)]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]

extern crate alloc;

mod raw;

pub mod rb_map;
#[cfg(feature = "std")]
pub mod catalog;

pub use rb_map::RbTreeMap;
#[cfg(feature = "std")]
pub use catalog::{Product, ProductCatalog};
