//! Distance matrices.
//!
//! Provides a dense distance matrix for orienteering instances. Travel time
//! equals distance throughout the crate.

mod matrix;

pub use matrix::DistanceMatrix;
