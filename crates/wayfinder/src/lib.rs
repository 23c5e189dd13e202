//! # Wayfinder
//!
//! Navigation state for a course marketplace header and its listing pages.
//!
//! A static taxonomy of [`NavNode`]s carries partial query filters. Walking
//! the taxonomy merges each node's filter with its ancestors' (descendants
//! win), builds concrete hrefs, and decides which entries render as active
//! for the current [`Location`].
//!
//! ## Architecture
//!
//! - **Taxonomy**: immutable [`NavTree`]s built once at startup
//! - **PathBuilder**: [`build_path`] merges filters and serializes the query
//! - **ActiveMatcher**: [`is_active`] plus the [`in_section`] page gate
//! - **Resolver**: one pass over a tree producing [`ResolvedLink`]s
//! - **MenuState**: dropdown, flyout and mobile drawer state machines
//! - **UrlSync**: listing filter forms kept in step with the URL
//!
//! ```
//! use wayfinder::{taxonomy, Location, Resolver};
//!
//! let location = Location::parse("/lectures?target=employee&format=online");
//! let links = Resolver::default().resolve(&taxonomy::course_tree(), &location).unwrap();
//!
//! let trail: Vec<_> = wayfinder::find_active_trail(&links)
//!     .iter()
//!     .map(|link| link.label.as_str())
//!     .collect();
//! assert_eq!(trail, vec!["재직자과정", "온라인"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app_context;
pub mod context;
pub mod error;
pub mod filter;
pub mod matcher;
pub mod menu;
pub mod path;
pub mod query;
pub mod resolve;
pub mod sync;
pub mod taxonomy;
pub mod tree;

// Re-export main types
pub use app_context::{AppContext, AuthState, MemoryStore, PreferenceStore, Role, Session, Theme};
pub use context::NavConfig;
pub use error::{NavError, Result};
pub use filter::{Filter, FilterKey, FilterScope, ScopeGuard};
pub use matcher::{in_section, is_active, is_link_active};
pub use menu::{
    AnchorSide, FlyoutRect, MenuEffect, MenuEvent, MenuKey, MenuPhase, MenuState,
    MobileMenuState,
};
pub use path::{ancestor_filters, build_path, effective_filter, path_for_filter};
pub use query::{CurrentQuery, Location};
pub use resolve::{find_active_trail, find_link, ResolvedLink, Resolver};
pub use sync::{
    CommunityFilterForm, LectureFilterForm, QueryForm, SyncOutcome, SyncPhase, UrlSync,
};
pub use tree::{HeaderItem, NavNode, NavTree};

/// Wayfinder version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
