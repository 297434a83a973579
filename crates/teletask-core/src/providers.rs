use serde::Serialize;

/// A streaming platform that can serve as a watchlist import source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Provider {
    /// URL-facing identifier, e.g. `amazon-prime`.
    pub slug: &'static str,
    /// TMDB watch-provider id, sent as the `with_watch_providers` parameter.
    pub tmdb_id: &'static str,
    /// Human-readable name used in task titles and flash messages.
    pub label: &'static str,
}

/// Every platform the import endpoint accepts. Order here is the order the
/// import buttons are rendered in.
pub const SUPPORTED_PROVIDERS: &[Provider] = &[
    Provider {
        slug: "netflix",
        tmdb_id: "8",
        label: "Netflix",
    },
    Provider {
        slug: "amazon-prime",
        tmdb_id: "9",
        label: "Amazon Prime Video",
    },
    Provider {
        slug: "apple-tv",
        tmdb_id: "350",
        label: "Apple TV",
    },
];

/// Looks up a provider by its URL slug.
pub fn find(slug: &str) -> Option<&'static Provider> {
    SUPPORTED_PROVIDERS.iter().find(|p| p.slug == slug)
}
