//! Persistent wishlist store.
//!
//! An explicit context object consumers receive by injection — there is no
//! module-level global. The wishlist is an ordered, id-deduplicated list of
//! game records with a snapshot/restore lifecycle: [`WishlistStore::load`]
//! reads the persisted JSON blob, mutations are in-memory, and
//! [`WishlistStore::save`] writes the snapshot back.

pub mod store;

pub use store::{WishlistError, WishlistStore, default_path};
