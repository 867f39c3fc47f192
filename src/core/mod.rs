//! # Core
//!
//! Domain types and the plumbing the presenters are built on.
//! Nothing in here knows about terminals or HTTP.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Category tree + ids  │
//!                    │  • Listing              │
//!                    │  • EventBus (pub/sub)   │
//!                    │  • Scope (cancellation) │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │ Presenters │      │ Repository │      │    TUI     │
//!     │ (screens)  │      │ (Trade Me) │      │ (ratatui)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`category`]: the `Category` tree and the id arithmetic behind back navigation
//! - [`listing`]: the `Listing` record
//! - [`bus`]: the `EventBus` carrying category selections between screens
//! - [`scope`]: `Scope`, the set of handles a presenter cancels on teardown
//! - [`config`]: layered configuration

pub mod bus;
pub mod category;
pub mod config;
pub mod listing;
pub mod scope;
