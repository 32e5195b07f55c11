use crate::aggregator::CountAggregator;
use crate::config::ScrapeConfig;
use crate::crawler::OfferLoader;
use crate::driver::BrowserDriver;
use crate::extractor::OfferExtractor;
use crate::models::CrawlReport;
use crate::progress::{LogProgress, Progress};
use crate::report::{ReportRenderer, ReportRequest};
use crate::Result;
use tracing::info;

/// Something that can open a browser session already showing a results list.
pub trait OfferSource {
    type Driver: BrowserDriver;

    fn open_session(&self) -> Result<Self::Driver>;
}

/// Load, extract and classify every offer of one session.
pub struct OfferPipeline<'d, D> {
    loader: OfferLoader<'d, D>,
    extractor: OfferExtractor<'d, D>,
    aggregator: CountAggregator,
}

impl<'d, D: BrowserDriver> OfferPipeline<'d, D> {
    pub fn new(driver: &'d D, config: &'d ScrapeConfig, aggregator: CountAggregator) -> Self {
        Self {
            loader: OfferLoader::new(
                driver,
                &config.selectors,
                config.timings,
                config.max_stalled_scrolls,
            ),
            extractor: OfferExtractor::new(
                driver,
                &config.selectors,
                config.timings,
                config.max_expand_attempts,
            ),
            aggregator,
        }
    }

    /// A single offer's failure never aborts the run; only loader errors do.
    pub fn run(self, min_offers: usize, progress: &mut dyn Progress) -> Result<CrawlReport> {
        let outcome = self.loader.load(min_offers)?;
        let entries = self.loader.entries()?;
        let mut aggregator = self.aggregator;
        let mut skipped = Vec::new();

        progress.begin(entries.len());
        for entry in &entries {
            match self.extractor.extract(entry, &entries) {
                Ok(text) => aggregator.record(&text),
                Err(failure) => skipped.push((entry.position, failure)),
            }
            progress.item_done(entry.position);
        }
        progress.finish();

        let extracted = aggregator.recorded();
        info!(extracted, skipped = skipped.len(), "offer parsing done");

        Ok(CrawlReport {
            loaded: outcome.loaded,
            met_minimum: outcome.met_minimum,
            extracted,
            skipped,
            tallies: aggregator.snapshot(),
        })
    }
}

pub struct CrawlPipeline {
    config: ScrapeConfig,
}

#[must_use = "pipeline must end with .render() to produce output"]
pub struct PipelineWithReport {
    report: CrawlReport,
    config: ScrapeConfig,
}

impl CrawlPipeline {
    pub fn new(config: ScrapeConfig) -> Self {
        Self { config }
    }

    pub fn crawl<S>(self, source: &S) -> Result<PipelineWithReport>
    where
        S: OfferSource,
    {
        let driver = source.open_session()?;
        let aggregator = CountAggregator::with_builtin(self.config.match_mode)?;
        let report = OfferPipeline::new(&driver, &self.config, aggregator)
            .run(self.config.search.min_offers, &mut LogProgress::default())?;

        Ok(PipelineWithReport {
            report,
            config: self.config,
        })
    }
}

impl Default for CrawlPipeline {
    fn default() -> Self {
        Self::new(ScrapeConfig::default())
    }
}

impl PipelineWithReport {
    pub fn report(&self) -> &CrawlReport {
        &self.report
    }

    pub fn render(self, renderer: &ReportRenderer) -> Result<CrawlReport> {
        renderer.render(&ReportRequest {
            tallies: &self.report.tallies,
            search_term: &self.config.search.search_term,
            location: &self.config.search.location,
        })?;
        Ok(self.report)
    }
}
