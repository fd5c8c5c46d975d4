// ABOUTME: Centralized constants for the image search CLI
// ABOUTME: Contains config file locations, timeouts and UI constants

/// Config file locations
pub mod config {
    /// Project-local config file name
    pub const LOCAL_FILE: &str = "image-search.toml";

    /// Directory under the user config home
    pub const APP_DIR: &str = "image-search";

    /// Config file name inside the app directory
    pub const FILE_NAME: &str = "config.toml";
}

/// Timeout configurations for various operations
pub mod timeouts {
    /// Progress spinner tick interval for smooth animation
    pub const PROGRESS_BAR_TICK_MS: u64 = 80;
}

/// UI and formatting constants
pub mod ui {
    /// Title of the submitted image table
    pub const SOURCE_TITLE: &str = "Source";

    /// Title of the results table
    pub const DESTINATION_TITLE: &str = "Results";

    /// Longest URL shown in a table cell before truncation
    pub const MAX_URL_WIDTH: usize = 60;

    /// Progress spinner layout
    pub const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
}
