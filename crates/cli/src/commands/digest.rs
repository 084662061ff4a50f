//! `digest` command: daily alert and weekly report emails.

use chrono::NaiveDate;
use clap::ValueEnum;

use shelf_life_core::{Product, daily_alert, weekly_report};

use crate::config::CliConfig;
use crate::email::{RenderedEmail, render_daily_alert, render_weekly_report};
use crate::error::CliError;

/// Output format for digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DigestFormat {
    /// Rendered HTML body
    Html,
    /// Plain text body with a subject line
    #[default]
    Text,
    /// Raw digest data
    Json,
}

fn format_email(email: RenderedEmail, format: DigestFormat) -> String {
    match format {
        DigestFormat::Html => email.html,
        // JSON is emitted before rendering.
        DigestFormat::Text | DigestFormat::Json => {
            format!("Subject: {}\n\n{}", email.subject, email.text)
        }
    }
}

/// Build and render the daily alert.
///
/// Returns an empty string when nothing needs attention, unless `format` is
/// JSON.
///
/// # Errors
///
/// Returns an error if rendering or encoding fails.
pub fn daily(
    products: &[Product],
    reference: NaiveDate,
    config: &CliConfig,
    format: DigestFormat,
) -> Result<String, CliError> {
    let alert = daily_alert(products, reference, &config.thresholds);

    if format == DigestFormat::Json {
        return Ok(serde_json::to_string_pretty(&alert)?);
    }
    if alert.is_empty() {
        tracing::info!(%reference, "No batches need attention, skipping daily alert");
        return Ok(String::new());
    }

    let email = render_daily_alert(&alert, &config.business_name)?;
    tracing::info!(%reference, batches = alert.len(), subject = %email.subject, "Rendered daily alert");
    Ok(format_email(email, format))
}

/// Build and render the weekly report.
///
/// # Errors
///
/// Returns an error if rendering or encoding fails.
pub fn weekly(
    products: &[Product],
    reference: NaiveDate,
    config: &CliConfig,
    format: DigestFormat,
) -> Result<String, CliError> {
    let report = weekly_report(products, reference, &config.thresholds);

    if format == DigestFormat::Json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let email = render_weekly_report(&report, &config.business_name)?;
    tracing::info!(%reference, products = report.product_count, subject = %email.subject, "Rendered weekly report");
    Ok(format_email(email, format))
}
