//! Synchronization between listing filter forms and the URL
//!
//! The URL is the source of truth. When the form writes the URL, the
//! resulting location change must not overwrite the form again; when the
//! URL changes from outside (back/forward, direct navigation) the form is
//! rebuilt from it.
//!
//! ```text
//! Idle --form_changed--> WritingUrl { href }
//! WritingUrl { href } --url_changed(href)--> Idle        (Echo)
//! WritingUrl { href } --url_changed(other)--> Idle       (Resynced/Unchanged)
//! Idle --url_changed--> Idle                             (Resynced/Unchanged)
//! ```

use crate::filter::{Filter, FilterKey};
use crate::path::path_for_filter;
use crate::query::{CurrentQuery, Location};
use crate::taxonomy::{is_community_category, Audience, DeliveryFormat};

/// A filter form whose state maps to and from query parameters.
pub trait QueryForm: Clone + PartialEq + Default {
    /// Build the form from the URL. Unknown or invalid values are dropped.
    fn from_query(query: &CurrentQuery) -> Self;

    /// The filter the form writes into the URL.
    fn to_filter(&self) -> Filter;
}

/// Filter form of the course listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LectureFilterForm {
    /// Audience selection
    pub target: Option<Audience>,
    /// Delivery format selection
    pub format: Option<DeliveryFormat>,
    /// Search text
    pub q: String,
}

impl QueryForm for LectureFilterForm {
    fn from_query(query: &CurrentQuery) -> Self {
        Self {
            target: query.get_key(FilterKey::Target).and_then(Audience::parse),
            format: query
                .get_key(FilterKey::Format)
                .and_then(DeliveryFormat::parse),
            q: query.get_key(FilterKey::Q).unwrap_or_default().to_string(),
        }
    }

    fn to_filter(&self) -> Filter {
        let mut filter = Filter::new();
        if let Some(target) = self.target {
            filter.insert(FilterKey::Target, target.as_str());
        }
        if let Some(format) = self.format {
            filter.insert(FilterKey::Format, format.as_str());
        }
        let q = self.q.trim();
        if !q.is_empty() {
            filter.insert(FilterKey::Q, q);
        }
        filter
    }
}

/// Filter form of the community board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunityFilterForm {
    /// Category label, one of the community categories
    pub category: Option<String>,
    /// Search text
    pub q: String,
}

impl QueryForm for CommunityFilterForm {
    fn from_query(query: &CurrentQuery) -> Self {
        Self {
            category: query
                .get_key(FilterKey::Category)
                .filter(|c| is_community_category(c))
                .map(str::to_string),
            q: query.get_key(FilterKey::Q).unwrap_or_default().to_string(),
        }
    }

    fn to_filter(&self) -> Filter {
        let mut filter = Filter::new();
        if let Some(category) = &self.category {
            filter.insert(FilterKey::Category, category.as_str());
        }
        let q = self.q.trim();
        if !q.is_empty() {
            filter.insert(FilterKey::Q, q);
        }
        filter
    }
}

/// Re-entrancy phase of a [`UrlSync`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncPhase {
    /// No write in flight
    Idle,
    /// The form pushed `href` and its location change has not arrived yet
    WritingUrl {
        /// The href that was pushed
        href: String,
    },
}

/// Result of observing a location change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The change was our own write; the form was left alone
    Echo,
    /// The form was rebuilt from the URL
    Resynced,
    /// The URL maps to the current form state
    Unchanged,
}

/// Keeps one listing form in step with the URL.
#[derive(Debug, Clone)]
pub struct UrlSync<F: QueryForm> {
    base_path: String,
    form: F,
    phase: SyncPhase,
}

impl<F: QueryForm> UrlSync<F> {
    /// Start from the current location.
    pub fn new(base_path: impl Into<String>, location: &Location) -> Self {
        Self {
            base_path: base_path.into(),
            form: F::from_query(&location.query),
            phase: SyncPhase::Idle,
        }
    }

    /// Current form state.
    pub fn form(&self) -> &F {
        &self.form
    }

    /// Current phase.
    pub fn phase(&self) -> &SyncPhase {
        &self.phase
    }

    /// The form changed. Returns the href to push, or `None` when the
    /// state is unchanged.
    pub fn form_changed(&mut self, form: F) -> Option<String> {
        if form == self.form {
            return None;
        }
        self.form = form;
        let href = path_for_filter(&self.base_path, &self.form.to_filter());
        tracing::debug!(%href, "form writing url");
        self.phase = SyncPhase::WritingUrl { href: href.clone() };
        Some(href)
    }

    /// Clear the form. Returns the href to push, if anything changed.
    pub fn reset(&mut self) -> Option<String> {
        self.form_changed(F::default())
    }

    /// The location changed.
    ///
    /// Always leaves the phase `Idle`, so the guard is re-armed after every
    /// pass.
    pub fn url_changed(&mut self, location: &Location) -> SyncOutcome {
        let phase = std::mem::replace(&mut self.phase, SyncPhase::Idle);
        if let SyncPhase::WritingUrl { href } = phase {
            if Location::parse(&href) == *location {
                return SyncOutcome::Echo;
            }
            tracing::debug!(
                pending = %href,
                pathname = %location.pathname,
                "external navigation during write"
            );
        }

        let next = F::from_query(&location.query);
        if next == self.form {
            return SyncOutcome::Unchanged;
        }
        self.form = next;
        tracing::debug!(pathname = %location.pathname, "form resynced from url");
        SyncOutcome::Resynced
    }
}
