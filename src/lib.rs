//! cakebot - A GitHub bot that keeps "under review" status labels on pull requests.
//!
//! Every pull request in an organization carries exactly one of `wip`,
//! `caked` or `awaiting-cake`, derived from its title and comments. The bot
//! converges labels with a bulk sync at startup and keeps them current from
//! webhooks afterwards.

pub mod config;
pub mod effects;
pub mod github;
pub mod pagination;
pub mod reconcile;
pub mod server;
pub mod status;
pub mod sync;
pub mod types;
pub mod webhooks;

#[cfg(test)]
pub(crate) mod test_utils;
