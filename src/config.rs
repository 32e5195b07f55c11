use crate::classifier::MatchMode;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MIN_OFFERS: usize = 25;
pub const DEFAULT_MAX_EXPAND_ATTEMPTS: u32 = 5;
pub const DEFAULT_MAX_STALLED_SCROLLS: usize = 5;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// e.g. "backend" or "frontend"; empty searches everything
    pub search_term: String,
    pub location: String,
    /// Minimum number of offers to load before parsing starts
    pub min_offers: usize,
    pub headless: bool,
    /// Chrome binary; `None` lets headless_chrome locate one
    pub chrome_path: Option<PathBuf>,
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            location: String::new(),
            min_offers: DEFAULT_MIN_OFFERS,
            headless: false,
            chrome_path: std::env::var_os("CHROME_PATH").map(PathBuf::from),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Fixed pauses used to pace the remote page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// After each scroll, before counting entries
    pub scroll_settle: Duration,
    /// Before each lookup of the expand control
    pub expand_pause: Duration,
    /// After clicking the neighbouring offer during recovery
    pub recovery_pause: Duration,
    pub visibility_timeout: Duration,
    /// After every offer, whatever the outcome
    pub offer_pacing: Duration,
    pub page_load_timeout: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            scroll_settle: Duration::from_secs(3),
            expand_pause: Duration::from_secs(1),
            recovery_pause: Duration::from_secs(2),
            visibility_timeout: Duration::from_secs(3),
            offer_pacing: Duration::from_secs(1),
            page_load_timeout: Duration::from_secs(15),
        }
    }
}

impl Timings {
    /// No pauses and zero timeouts, for scripted drivers.
    pub fn immediate() -> Self {
        Self {
            scroll_settle: Duration::ZERO,
            expand_pause: Duration::ZERO,
            recovery_pause: Duration::ZERO,
            visibility_timeout: Duration::ZERO,
            offer_pacing: Duration::ZERO,
            page_load_timeout: Duration::ZERO,
        }
    }
}

/// CSS selectors for the public LinkedIn job search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    pub keywords_input: String,
    pub location_input: String,
    pub search_button: String,
    pub results_list: String,
    pub offer_entries: String,
    pub load_more: String,
    pub expand_button: String,
    pub offer_body: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            keywords_input: r#"[id="job-search-bar-keywords"]"#.to_string(),
            location_input: r#"[id="job-search-bar-location"]"#.to_string(),
            search_button: r#"[data-tracking-control-name="public_jobs_jobs-search-bar_base-search-bar-search-submit"]"#.to_string(),
            results_list: "ul.jobs-search__results-list".to_string(),
            offer_entries: "ul.jobs-search__results-list > li".to_string(),
            load_more: r#"[data-tracking-control-name="infinite-scroller_show-more"]"#.to_string(),
            expand_button: r#"[data-tracking-control-name="public_jobs_show-more-html-btn"]"#.to_string(),
            offer_body: "div.show-more-less-html__markup".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    pub search: SearchConfig,
    pub timings: Timings,
    pub selectors: Selectors,
    pub match_mode: MatchMode,
    /// Expand lookups per offer before it is skipped
    pub max_expand_attempts: u32,
    /// Consecutive scrolls without new entries before loading gives up
    pub max_stalled_scrolls: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            timings: Timings::default(),
            selectors: Selectors::default(),
            match_mode: MatchMode::default(),
            max_expand_attempts: DEFAULT_MAX_EXPAND_ATTEMPTS,
            max_stalled_scrolls: DEFAULT_MAX_STALLED_SCROLLS,
        }
    }
}
