//! Roots Types
//!
//! `roots/list` is a server-to-client request; the client answers with the
//! roots it exposes.

use serde::{Deserialize, Serialize};

/// A root the client exposes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RootInfo {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub description: Option<String>,
}

/// Result of roots/list request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ListRootsResult {
    pub roots: Vec<RootInfo>,

    #[serde(
        rename = "nextCursor",
        default,
        skip_serializing_if = "crate::codec::omit_none"
    )]
    pub next_cursor: Option<String>,
}
