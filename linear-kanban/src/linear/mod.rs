//! Linear API access
//!
//! [`LinearApi`] is the seam between the MCP surface and the service.
//! [`GraphqlLinearClient`] talks to the real GraphQL endpoint and
//! [`mock::MockLinearClient`] keeps everything in memory.

/// The client trait
pub mod client;
/// GraphQL-over-HTTP implementation
pub mod graphql;
/// In-memory implementation for tests
pub mod mock;
/// Entities and mutation inputs
pub mod model;
/// Explicit relation lookups
pub mod relations;

pub use client::LinearApi;
pub use graphql::GraphqlLinearClient;
pub use mock::{MockCall, MockFixtures, MockLinearClient};
