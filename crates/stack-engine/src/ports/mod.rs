//! # Ports Layer
//!
//! Defines the port traits for the stack engine.
//!
//! ## Hexagonal Architecture
//!
//! - `inbound.rs` - Driving ports (operations exposed to callers)
//! - `outbound.rs` - Driven ports (ledger, cipher, storage, time)

pub mod inbound;
pub mod outbound;
