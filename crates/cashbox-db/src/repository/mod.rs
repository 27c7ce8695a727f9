//! # Repository Module
//!
//! Database repository implementations for the cashbox.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Caller                                                                 │
//! │       │                                                                 │
//! │       │  db.denominations().withdraw(id, Some("receipt-0042"))         │
//! │       ▼                                                                 │
//! │  DenominationRepository                                                │
//! │  ├── insert(&self, &mut denomination)                                  │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── list(&self, active_only)                                          │
//! │  ├── apply(&self, id, command)                                         │
//! │  └── withdraw(&self, id, reference)                                    │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database (denominations, change_records)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`DenominationRepository`](denomination::DenominationRepository) - denominations and their change records

pub mod denomination;
