//! Markup contract shared with the server-rendered templates

// Intake page
pub const FORM_SELECTOR: &str = "#email-form";
pub const TEXTAREA_SELECTOR: &str = "#email_text";
pub const FILE_INPUT_SELECTOR: &str = "#email_file";
pub const COUNTER_SELECTOR: &str = "#char-count";
pub const COUNTER_ID: &str = "char-count";
pub const COUNTER_CLASS: &str = "char-count";
pub const LOADING_OVERLAY_CLASS: &str = "loading-overlay";
pub const LOADING_CAPTION: &str = "Analyzing email…";

// Result page
pub const RESULTS_SELECTOR: &str = ".results";
pub const CONTENT_SELECTOR: &str = ".email-content";
pub const VERDICT_SELECTOR: &str = "h2";
pub const CONFIDENCE_SELECTOR: &str = ".result-summary";
pub const INDICATOR_SELECTOR: &str = ".indicator";
pub const INDICATOR_TITLE_SELECTOR: &str = ".indicator-title";
pub const INDICATOR_TOOLTIP_SELECTOR: &str = ".indicator-tooltip";
pub const ACTION_BUTTONS_SELECTOR: &str = ".action-buttons";
pub const ACTION_BUTTONS_CLASS: &str = "action-buttons";
pub const EXPLANATION_TOGGLE_SELECTOR: &str = ".explanation-toggle";

pub const LEGEND_CLASS: &str = "highlight-legend";
pub const LEGEND_ITEM_CLASS: &str = "legend-item";
pub const TOOLTIP_CLASS: &str = "highlight-tooltip";
pub const COLLAPSED_CLASS: &str = "collapsed";
pub const CONTENT_TOGGLE_CLASS: &str = "toggle-content";
pub const COPY_BUTTON_CLASS: &str = "copy-results";
pub const COPY_LABEL: &str = "Copy Results";
pub const COPIED_LABEL: &str = "Copied!";

/// Set on elements a controller has already wired
pub const READY_ATTR: &str = "data-phishscan-ready";

/// Attribute on `<body>` carrying the JSON page configuration
pub const CONFIG_ATTR: &str = "data-phishscan-config";
