//! Prefix-tree route table with backtracking lookup
//!
//! Patterns are registered into a trie keyed by path segment. At each node
//! a literal child is tried before the named-parameter child, which is
//! tried before the wildcard child, with early return on the first success;
//! combined with backtracking this resolves every URL to the most specific
//! registered pattern regardless of registration order.

use crate::{url, Result};
use smallvec::SmallVec;
use std::collections::HashMap;
use tracing::trace;

/// Parameters captured while descending the trie.
///
/// Kept as an ordered list rather than a map so a backtracking frame can
/// discard the captures of an abandoned branch with a single `truncate`.
type ParamList = SmallVec<[(String, String); 4]>;

/// Route match result
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<T> {
    /// The matched handler value
    pub handler: T,
    /// Captured path parameters, with query parameters merged over them
    pub params: HashMap<String, String>,
}

impl<T> RouteMatch<T> {
    /// Get a captured parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|s| s.as_str())
    }
}

/// Trie node for path segment matching
#[derive(Debug)]
struct Node<T> {
    /// Literal children, keyed by lowercased segment text
    children: HashMap<String, Node<T>>,
    /// Named-parameter child (`:id`)
    param_child: Option<Box<ParamNode<T>>>,
    /// Wildcard child (`*path`)
    wildcard_child: Option<Box<ParamNode<T>>>,
    /// Handler if a registered pattern ends at this node
    handler: Option<T>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            children: HashMap::new(),
            param_child: None,
            wildcard_child: None,
            handler: None,
        }
    }
}

/// A node reached through a capturing edge; `name` is the capture name
/// with its `:`/`*` sigil stripped.
#[derive(Debug)]
struct ParamNode<T> {
    name: String,
    node: Node<T>,
}

impl<T> ParamNode<T> {
    fn new() -> Self {
        Self {
            name: String::new(),
            node: Node::default(),
        }
    }
}

/// Backtracking prefix-tree URL router
///
/// Generic over the handler type `T`, which is opaque caller data — the
/// router stores and returns it but never inspects it. Built once, then
/// read-only: `route` takes `&self`, so a finished router can be shared
/// across threads freely.
#[derive(Debug)]
pub struct Router<T> {
    root: Node<T>,
}

impl<T> Router<T> {
    /// Create an empty router
    pub fn new() -> Self {
        Self {
            root: Node::default(),
        }
    }

    /// Register a route
    ///
    /// Pattern segments starting with `:` capture one input segment;
    /// segments starting with `*` capture the remaining path (a bare `*`
    /// captures under the name `*`). Anything else is a literal, matched
    /// case-insensitively. Leading/trailing slashes and a leading `#` are
    /// ignored, and the empty pattern matches the empty path.
    ///
    /// Registering the same pattern twice silently replaces the earlier
    /// handler.
    ///
    /// # Example
    /// ```
    /// use veer::Router;
    ///
    /// let mut router = Router::new();
    /// router.insert("posts/:id", "post");
    /// router.insert("static/*file", "asset");
    /// ```
    pub fn insert(&mut self, pattern: &str, handler: T) {
        trace!(pattern, "route registered");
        let segments = url::segments(pattern);
        Self::insert_node(&mut self.root, &segments, handler);
    }

    fn insert_node(node: &mut Node<T>, segments: &[&str], handler: T) {
        if segments.is_empty() {
            node.handler = Some(handler);
            return;
        }

        let segment = segments[0];
        let rest = &segments[1..];

        if let Some(name) = segment.strip_prefix(':') {
            // Named parameter segment; the last registration names the edge
            let param = node
                .param_child
                .get_or_insert_with(|| Box::new(ParamNode::new()));
            param.name = name.to_string();
            Self::insert_node(&mut param.node, rest, handler);
        } else if let Some(name) = segment.strip_prefix('*') {
            // Wildcard segment (*path or bare *)
            let wildcard = node
                .wildcard_child
                .get_or_insert_with(|| Box::new(ParamNode::new()));
            wildcard.name = if name.is_empty() { "*" } else { name }.to_string();
            Self::insert_node(&mut wildcard.node, rest, handler);
        } else {
            // Literal segment, case-folded at registration and at lookup
            let child = node.children.entry(segment.to_lowercase()).or_default();
            Self::insert_node(child, rest, handler);
        }
    }

    fn lookup<'n>(
        node: &'n Node<T>,
        segments: &[&str],
        params: &mut ParamList,
    ) -> Result<Option<&'n T>> {
        if segments.is_empty() {
            // A handler-less node fails here so an ancestor frame can fall
            // back to its own named/wildcard attempt
            return Ok(node.handler.as_ref());
        }

        let segment = segments[0];
        let rest = &segments[1..];
        let depth = params.len();

        // Priority 1: literal match (highest)
        if let Some(child) = node.children.get(segment.to_lowercase().as_str()) {
            if let Some(handler) = Self::lookup(child, rest, params)? {
                return Ok(Some(handler));
            }
        }

        // Priority 2: named parameter, capturing the original-case segment.
        // Truncate first: a failed deeper literal branch may have captured
        // params that must not leak into this attempt.
        if let Some(param) = &node.param_child {
            params.truncate(depth);
            params.push((param.name.clone(), url::decode(segment)?));
            if let Some(handler) = Self::lookup(&param.node, rest, params)? {
                return Ok(Some(handler));
            }
        }

        // Priority 3: wildcard consumes every remaining segment
        if let Some(wildcard) = &node.wildcard_child {
            params.truncate(depth);
            params.push((wildcard.name.clone(), url::decode(&segments.join("/"))?));
            if let Some(handler) = Self::lookup(&wildcard.node, &[], params)? {
                return Ok(Some(handler));
            }
        }

        params.truncate(depth);
        Ok(None)
    }
}

impl<T: Clone> Router<T> {
    /// Resolve a URL to its handler and parameters
    ///
    /// The URL is split at the first `?`; the path part is matched against
    /// the route table, then query parameters are decoded and merged over
    /// the path captures (query wins on a name collision).
    ///
    /// # Returns
    /// - `Ok(Some(RouteMatch))` on a match
    /// - `Ok(None)` when no pattern matches and no catch-all is registered;
    ///   no query parameters are computed in that case
    /// - `Err(Error::Decode)` when a captured parameter or query component
    ///   is not valid UTF-8 after percent-decoding
    ///
    /// # Example
    /// ```
    /// use veer::Router;
    ///
    /// let mut router = Router::new();
    /// router.insert("posts/:id", "post");
    ///
    /// let m = router.route("/posts/17").unwrap().unwrap();
    /// assert_eq!(m.handler, "post");
    /// assert_eq!(m.param("id"), Some("17"));
    /// ```
    pub fn route(&self, url: &str) -> Result<Option<RouteMatch<T>>> {
        let (path, query) = url::split_query(url);
        let segments = url::segments(path);

        let mut captures = ParamList::new();
        let Some(handler) = Self::lookup(&self.root, &segments, &mut captures)? else {
            trace!(url, "no route matched");
            return Ok(None);
        };

        let mut params: HashMap<String, String> = captures.into_iter().collect();
        if let Some(query) = query {
            url::parse_query(query, &mut params)?;
        }

        Ok(Some(RouteMatch {
            handler: handler.clone(),
            params,
        }))
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AsRef<str>, T> FromIterator<(S, T)> for Router<T> {
    /// Build a router from `(pattern, handler)` pairs
    fn from_iter<I: IntoIterator<Item = (S, T)>>(pairs: I) -> Self {
        let mut router = Router::new();
        for (pattern, handler) in pairs {
            router.insert(pattern.as_ref(), handler);
        }
        router
    }
}
