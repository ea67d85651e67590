//! veer: backtracking prefix-tree URL router
//!
//! Maps a relative URL (path, optional query string, optional hash fragment)
//! to a registered handler value plus the parameters captured along the way.
//! The route table is built once at startup and then queried on every
//! navigation event.
//!
//! ## Path Syntax
//! - `users/list` - literal segments, matched case-insensitively
//! - `:name` - named parameter (captures one segment, percent-decoded)
//! - `*` or `*name` - wildcard (captures the remaining path)
//!
//! ## Priority
//! 1. Literal match (highest)
//! 2. Named parameter match
//! 3. Wildcard match (lowest)
//!
//! Priority is applied per segment with backtracking, so the winner is
//! always the most specific registered pattern, independent of
//! registration order.
//!
//! ## Example
//! ```
//! use veer::Router;
//!
//! let mut router = Router::new();
//! router.insert("users", 0);
//! router.insert("users/:id", 1);
//! router.insert("files/*path", 2);
//!
//! let m = router.route("/users/42?tab=posts").unwrap().unwrap();
//! assert_eq!(m.handler, 1);
//! assert_eq!(m.params["id"], "42");
//! assert_eq!(m.params["tab"], "posts");
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod error;
pub mod router;

mod url;

pub use error::{Error, Result};
pub use router::{RouteMatch, Router};
