// ABOUTME: Centralized constants for the image search SDK
// ABOUTME: Contains timeouts, service paths, paging defaults and identifier alphabets

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Default timeout applied to every service operation
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Search service URLs
pub mod urls {
    /// Default base URL of a locally running search service
    pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

    /// Path prefix every operation lives under
    pub const API_PREFIX: &str = "/api/SearchServer";
}

/// Service status codes
pub mod status {
    /// The only status value that means success
    pub const SUCCESS: &str = "00000";
}

/// Paging defaults for image listings
pub mod paging {
    pub const DEFAULT_PAGE_SIZE: u32 = 20;
    pub const FIRST_PAGE: u32 = 1;
}

/// Correlation id generation
pub mod correlation {
    /// Characters a correlation id is drawn from. Glyphs that are easy to
    /// confuse (0/O/o, 1/I/l/L, 9/g/q, U/u/V/v) are left out.
    pub const ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTWXYZabcdefhijkmnprstwxyz2345678";

    /// Default correlation id length
    pub const DEFAULT_LENGTH: usize = 12;
}

/// Display texts
pub mod captions {
    /// Caption of the submitted image in the source region
    pub const SOURCE_IMAGE: &str = "source image";
}
