//! Review status classification from a pull request's title and comments.

pub mod classify;

pub use classify::{CAKE_MARKER, classify, is_caked, is_wip};
