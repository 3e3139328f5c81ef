//! Application constants.
//!
//! Centralizes magic numbers and display strings for better maintainability.

/// Upstream `ChurchTools` defaults.
pub mod churchtools {
    /// Base URL used when `CHURCHTOOLS_API_BASE` is unset.
    pub const DEFAULT_BASE_URL: &str = "https://your-church.church.tools/api";

    /// Authorization scheme name sent before the token.
    pub const AUTH_SCHEME: &str = "Login";

    /// Request timeout in seconds.
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Service name reported by the status endpoint.
    pub const SERVICE_NAME: &str = "ChurchTools";
}

/// Display width and list caps.
pub mod display {
    /// Joined resource labels longer than this are truncated for upcoming rows.
    pub const MAX_RESOURCE_CHARS: usize = 40;

    /// Number of resource labels kept when truncating.
    pub const VISIBLE_RESOURCE_LABELS: usize = 3;

    /// Maximum birthdays shown.
    pub const MAX_BIRTHDAYS: usize = 4;

    /// Maximum flyers in the carousel.
    pub const MAX_FLYERS: usize = 5;

    /// Day horizon for flyer candidates.
    pub const FLYER_HORIZON_DAYS: i64 = 30;

    /// Generic title when an appointment has neither title nor caption.
    pub const DEFAULT_TITLE: &str = "Termin";

    /// Fallback name for a birthday row without a person.
    pub const UNKNOWN_PERSON: &str = "Unbekannt";

    /// Fallback display name for a roster role missing from the catalog.
    pub const UNKNOWN_SERVICE: &str = "Dienst";
}

/// Sermon detail constants.
pub mod sermon {
    /// Case-insensitive marker of the sermon topic line.
    pub const PREDIGT_MARKER: &str = "predigt";

    /// Day horizon searched for the next sermon.
    pub const SEARCH_HORIZON_DAYS: i64 = 30;

    /// Message returned when no upcoming sermon exists.
    pub const NOT_FOUND_MESSAGE: &str = "Keine bevorstehenden Gottesdienste gefunden";

    /// Message returned when the sermon could not be loaded.
    pub const LOAD_FAILED_MESSAGE: &str = "Fehler beim Laden der Veranstaltungen";

    /// Featured program roles: service id and label.
    pub const FEATURED_ROLES: &[(i64, &str)] = &[(24, "Predigt"), (27, "Moderation"), (131, "Gebet")];

    /// Service id of the teens program unless configured otherwise.
    pub const TEENS_SERVICE_ID: i64 = 62;

    /// Keyword for kids meeting outside.
    pub const KIDS_OUTSIDE: &str = "kids draussen";

    /// Keyword for kids meeting inside.
    pub const KIDS_INSIDE: &str = "kids drinnen";

    /// Keyword for teens meeting outside.
    pub const TEENS_OUTSIDE: &str = "teens draussen";

    /// Keyword for teens meeting inside.
    pub const TEENS_INSIDE: &str = "teens drinnen";
}

/// Verse of the week.
pub mod verse {
    /// Devotionalium API endpoint.
    pub const DEVOTIONALIUM_URL: &str = "https://devotionalium.com/api/v2";

    /// Source label for verses from Devotionalium.
    pub const DEVOTIONALIUM_SOURCE: &str = "Devotionalium";

    /// Source label for the built-in verse.
    pub const FALLBACK_SOURCE: &str = "Fallback";

    /// Built-in verse text.
    pub const FALLBACK_TEXT: &str = "Jesus redete zu ihnen und sprach: Ich bin das Licht der Welt. \
        Wer mir nachfolgt, wird nicht in der Finsternis wandeln, sondern das Licht des Lebens haben.";

    /// Built-in verse reference.
    pub const FALLBACK_REFERENCE: &str = "Johannes 8:12";
}

/// HTTP server defaults.
pub mod server {
    /// Default bind host.
    pub const DEFAULT_HOST: &str = "0.0.0.0";

    /// Default bind port.
    pub const DEFAULT_PORT: u16 = 5000;

    /// Default configuration document path.
    pub const DEFAULT_CONFIG_PATH: &str = "config.json";
}
