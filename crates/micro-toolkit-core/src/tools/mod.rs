//! Tool management module
//!
//! Caching, selection and adaptation of the tools a gateway exposes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  GatewayClient                              │
//! │                                             │
//! │  SnapshotCache   - lazily fetched tool list │
//! │  ToolFilter      - service/pattern/include/ │
//! │                    exclude selection        │
//! │  InvocableTool   - descriptor + client,     │
//! │                    string in / string out   │
//! └─────────────────────────────────────────────┘
//!           │
//!           │ HTTP (GET /mcp/tools, POST /mcp/call)
//!           ▼
//! ┌─────────────────────────────────────────────┐
//! │  MCP Gateway                                │
//! │                                             │
//! │  One tool per service endpoint:             │
//! │    users.Users.Get, blog.Blog.List, ...     │
//! └─────────────────────────────────────────────┘
//! ```

mod registry;
mod filter;
mod invocable;

pub use registry::SnapshotCache;
pub use filter::ToolFilter;
pub use invocable::{InvocableTool, extended_description};
