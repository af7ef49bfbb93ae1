//! # provena-store
//!
//! Collaborator traits and in-memory reference backends for the PROVENA
//! audit subsystem.
//!
//! The recorder, verifier, and read surface all talk to their external
//! collaborators exclusively through the traits defined here, constructed
//! and passed in explicitly. The in-memory implementations back the test
//! suites and the demo binary.

pub mod filter;
pub mod memory;
pub mod traits;

pub use filter::EventFilter;
pub use memory::{InMemoryDirectory, InMemoryEventStore, InMemoryNotificationSink};
pub use traits::{AdminDirectory, EventStore, NotificationSink};
