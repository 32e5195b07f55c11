use jd_demand::cli::{self, Command};
use jd_demand::{CrawlPipeline, LinkedInClient, ReportRenderer, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        if e.is_usage() {
            eprintln!("Try --help for usage.");
            std::process::exit(2);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let params = match cli::parse_args(std::env::args().skip(1))? {
        Command::Help => {
            print!("{}", cli::HELP);
            return Ok(());
        }
        Command::Run(params) => params,
    };

    jd_demand::logging::init(params.verbose);

    let config = params.scrape_config();
    let renderer = ReportRenderer::new(params.output_mode());

    let report = CrawlPipeline::new(config.clone())
        .crawl(&LinkedInClient::new(config))?
        .render(&renderer)?;

    tracing::info!(
        loaded = report.loaded,
        extracted = report.extracted,
        skipped = report.skipped.len(),
        met_minimum = report.met_minimum,
        "✅ done"
    );
    Ok(())
}
