pub mod aggregator;
pub mod chart;
pub mod classifier;
pub mod cli;
pub mod clients;
pub mod config;
pub mod crawler;
pub mod driver;
pub mod error;
pub mod extractor;
pub mod keywords;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod utils;

pub use aggregator::{CountAggregator, KeywordTally};
pub use chart::{BarChartRenderer, ChartLabels, CountsRenderer};
pub use classifier::{classify, MatchMode, TextClassifier};
pub use clients::LinkedInClient;
pub use config::{ScrapeConfig, SearchConfig, Selectors, Timings};
pub use crawler::{LoadOutcome, OfferLoader};
pub use driver::{BrowserDriver, ChromeDriver, ElementHandle};
pub use error::ScrapeError;
pub use extractor::OfferExtractor;
pub use keywords::KeywordDictionary;
pub use models::{CrawlReport, ExtractFailure, ExtractionResult, OfferEntry, Tally, TallySnapshot};
pub use pipeline::{CrawlPipeline, OfferPipeline, OfferSource};
pub use progress::{LogProgress, NullProgress, Progress};
pub use report::{OutputMode, ReportRenderer};

pub type Result<T> = std::result::Result<T, ScrapeError>;
