//! # Brook
//!
//! A terminal client for reading unread entries from a Feedbin account.
//!
//! ## Architecture
//!
//! ```text
//! Gateway → Aggregator → ReadingList → Session → TUI
//! ```
//!
//! - [`api`]: authenticated calls against the remote service
//! - [`aggregator`]: builds the capped, newest-first reading list
//! - [`session`]: select / display / confirm loop that marks entries read
//! - [`render`]: plain-text rendering of an entry
//! - [`tui`]: ratatui front end for the session
//!
//! ## Quick Start
//!
//! ```bash
//! # Store credentials
//! brook authenticate me@example.com secret
//!
//! # Counts
//! brook stats
//!
//! # Read
//! brook unread
//! ```

/// Builds the reading list from the unread set, entry bodies and feed titles.
pub mod aggregator;

/// Remote service access.
///
/// - [`Gateway`](api::Gateway): async trait, one method per remote call
/// - [`HttpGateway`](api::HttpGateway): reqwest implementation with basic auth
pub mod api;

/// Application context and error handling.
pub mod app;

/// Command-line interface using clap.
///
/// - `authenticate <email> <password>` - verify and store credentials
/// - `stats` - unread, starred and subscription counts
/// - `unread` - browse unread entries
pub mod cli;

/// Configuration loaded from `~/.config/brook/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Entry`](domain::Entry): a single article
/// - [`Feed`](domain::Feed): feed id and title
/// - [`ReadingList`](domain::ReadingList): ordered, capped entry list
/// - [`Credential`](domain::Credential): account identifier and secret
pub mod domain;

/// Plain-text entry rendering.
///
/// - [`EntryView`](render::EntryView): header fields, separator and body
/// - [`html_to_text`](render::html_to_text): strips markup for the terminal
pub mod render;

/// Reading session state machine, independent of any terminal.
pub mod session;

/// Credential persistence.
pub mod store;

/// Terminal user interface.
///
/// Keybindings: j/k move, n/p page, Enter reads, q or Ctrl+C quits.
pub mod tui;
