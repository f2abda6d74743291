//! Partition comparison metrics.

pub mod ari;

pub use ari::{adjusted_rand_index, pair_confusion_matrix, PairConfusion};
