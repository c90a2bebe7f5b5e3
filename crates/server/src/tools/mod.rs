//! MCP tool implementations.
//!
//! This module contains all tools exposed by the mcp-edgar server.

pub mod download_sec_filing;
