//! Digests and their hashing primitive.
//!
//! This crate provides [`ObjectId`], the 20-byte content-derived identifier used throughout the
//! workspace, along with [`Hasher`] which is the only place that ever imports an actual SHA-1
//! implementation.
#![deny(rust_2018_idioms)]

mod hasher;
mod oid;

pub use hasher::{hash_buffers, Hasher};
pub use oid::{DecodeError, ObjectId, SIZE_OF_SHA1_DIGEST};
