//! Alert and report email bodies.
//!
//! Renders the daily alert and weekly report with Askama HTML and plain-text
//! templates. Delivery is left to whatever scheduler invokes the CLI.

use askama::Template;
use serde::Serialize;
use thiserror::Error;

use shelf_life_core::{AlertEntry, DailyAlert, Tier, WeeklyReport};

/// Errors that can occur when rendering an email.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// A rendered email, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// One batch row, preformatted for templates.
struct EntryRow {
    product_name: String,
    category: String,
    batch_label: String,
    expiry_date: String,
    quantity: String,
    days_label: String,
    tier: &'static str,
}

impl From<&AlertEntry> for EntryRow {
    fn from(entry: &AlertEntry) -> Self {
        Self {
            product_name: entry.product_name.clone(),
            category: entry.category.clone(),
            batch_label: entry
                .batch_number
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            expiry_date: entry.expiry_date.format("%b %-d, %Y").to_string(),
            quantity: entry
                .quantity
                .map_or_else(|| "unknown".to_string(), |q| q.to_string()),
            days_label: entry.days_label(),
            tier: entry.tier.as_str(),
        }
    }
}

struct AlertSection {
    title: &'static str,
    tier: &'static str,
    rows: Vec<EntryRow>,
}

impl AlertSection {
    fn new(title: &'static str, tier: Tier, entries: &[AlertEntry]) -> Self {
        Self {
            title,
            tier: tier.as_str(),
            rows: entries.iter().map(EntryRow::from).collect(),
        }
    }
}

struct CategoryRow {
    name: String,
    product_count: usize,
    batch_count: usize,
    total_quantity: u64,
    expired_batches: usize,
    expiring_batches: usize,
}

/// HTML template for the daily alert.
#[derive(Template)]
#[template(path = "email/daily_alert.html")]
struct DailyAlertHtml<'a> {
    business_name: &'a str,
    date: &'a str,
    batches: &'a str,
    sections: &'a [AlertSection],
}

/// Plain text template for the daily alert.
#[derive(Template)]
#[template(path = "email/daily_alert.txt")]
struct DailyAlertText<'a> {
    business_name: &'a str,
    date: &'a str,
    batches: &'a str,
    sections: &'a [AlertSection],
}

/// HTML template for the weekly report.
#[derive(Template)]
#[template(path = "email/weekly_report.html")]
struct WeeklyReportHtml<'a> {
    business_name: &'a str,
    period: &'a str,
    report: &'a WeeklyReport,
    categories: &'a [CategoryRow],
    upcoming: &'a [EntryRow],
}

/// Plain text template for the weekly report.
#[derive(Template)]
#[template(path = "email/weekly_report.txt")]
struct WeeklyReportText<'a> {
    business_name: &'a str,
    period: &'a str,
    report: &'a WeeklyReport,
    categories: &'a [CategoryRow],
    upcoming: &'a [EntryRow],
}

/// "1 batch", "3 batches".
fn batch_count_label(count: usize) -> String {
    match count {
        1 => "1 batch".to_string(),
        n => format!("{n} batches"),
    }
}

/// Render the daily alert email.
///
/// Empty sections are left out.
///
/// # Errors
///
/// Returns error if a template fails to render.
pub fn render_daily_alert(alert: &DailyAlert, business_name: &str) -> Result<RenderedEmail, RenderError> {
    let sections: Vec<AlertSection> = [
        AlertSection::new("Expired", Tier::Expired, &alert.expired),
        AlertSection::new("Urgent", Tier::Urgent, &alert.urgent),
        AlertSection::new("Coming up this week", Tier::Warning, &alert.warning),
    ]
    .into_iter()
    .filter(|section| !section.rows.is_empty())
    .collect();

    let date = alert.reference.format("%A, %B %-d, %Y").to_string();
    let batches = batch_count_label(alert.len());

    let html = DailyAlertHtml {
        business_name,
        date: &date,
        batches: &batches,
        sections: &sections,
    }
    .render()?;
    let text = DailyAlertText {
        business_name,
        date: &date,
        batches: &batches,
        sections: &sections,
    }
    .render()?;

    let subject = match alert.expired.len() {
        0 => format!("{business_name}: {batches} expiring soon"),
        expired => format!("{business_name}: {expired} expired, {batches} needing attention"),
    };

    Ok(RenderedEmail {
        subject,
        html,
        text,
    })
}

/// Render the weekly report email.
///
/// # Errors
///
/// Returns error if a template fails to render.
pub fn render_weekly_report(
    report: &WeeklyReport,
    business_name: &str,
) -> Result<RenderedEmail, RenderError> {
    let categories: Vec<CategoryRow> = report
        .categories
        .iter()
        .map(|(name, summary)| CategoryRow {
            name: name.clone(),
            product_count: summary.product_count,
            batch_count: summary.batch_count,
            total_quantity: summary.total_quantity,
            expired_batches: summary.expired_batches,
            expiring_batches: summary.expiring_batches,
        })
        .collect();
    let upcoming: Vec<EntryRow> = report.upcoming.iter().map(EntryRow::from).collect();
    let period = format!(
        "{} - {}",
        report.reference.format("%b %-d"),
        report.period_end.format("%b %-d, %Y")
    );

    let html = WeeklyReportHtml {
        business_name,
        period: &period,
        report,
        categories: &categories,
        upcoming: &upcoming,
    }
    .render()?;
    let text = WeeklyReportText {
        business_name,
        period: &period,
        report,
        categories: &categories,
        upcoming: &upcoming,
    }
    .render()?;

    Ok(RenderedEmail {
        subject: format!("{business_name}: weekly inventory report ({period})"),
        html,
        text,
    })
}
