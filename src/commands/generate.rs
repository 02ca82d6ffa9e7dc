//! Generate the static export

use anyhow::Result;

use crate::generator::{GenerateReport, Generator};
use crate::Site;

/// Generate the static export and log what was left out
pub fn run(site: &Site) -> Result<GenerateReport> {
    let start = std::time::Instant::now();

    let report = Generator::new(site).generate()?;

    for skipped in &report.skipped {
        tracing::warn!("Not published: {:?} ({})", skipped.path, skipped.reason);
    }

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} posts and {} listing pages in {:.2}s",
        report.posts,
        report.listing_pages,
        duration.as_secs_f64()
    );

    Ok(report)
}
