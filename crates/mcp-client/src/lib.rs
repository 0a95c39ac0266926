//! MCP client for the ForceWeaver Revenue Cloud health checking service.
//!
//! A thin shell: the four tools assemble parameters and delegate to
//! `forceweaver-api-client`, which performs the HTTP call and classifies the
//! outcome. All analysis happens remotely.

pub mod server;
pub mod tools;

pub use server::ForceWeaverServer;
