//! Current-line blame annotation.
//!
//! Renders an `AttributionRecord` two ways:
//! - inline label after the line: `author, age • summary (short id)`
//! - hover card with the full commit details as Markdown

use serde::Serialize;

use crate::git::repository::format_local_date;
use crate::models::AttributionRecord;

const MAX_INLINE_SUMMARY: usize = 50;

/// Inline decoration for one line (zero-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineAnnotation {
    pub line: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverCard {
    pub markdown: String,
}

pub fn inline_label(record: &AttributionRecord) -> String {
    format!(
        "{}, {} • {} ({})",
        record.author,
        record.relative_date,
        truncate_summary(&record.summary),
        record.short_id
    )
}

pub fn inline_annotation(line: u32, record: Option<&AttributionRecord>) -> Option<InlineAnnotation> {
    record.map(|record| InlineAnnotation {
        line,
        text: inline_label(record),
    })
}

pub fn hover_card(record: &AttributionRecord) -> HoverCard {
    let mut md = String::new();

    md.push_str(&format!("### Commit: `{}`\n\n", record.full_id));

    md.push_str(&format!("**Author:** {}", record.author));
    if !record.author_email.is_empty() {
        md.push_str(&format!(" <{}>", record.author_email));
    }
    md.push_str("\n\n");

    md.push_str(&format!(
        "**Date:** {} *({})*\n\n",
        format_local_date(record.author_time),
        record.relative_date
    ));

    md.push_str("**Message:**\n\n");
    md.push_str(&format!("> {}\n\n", record.summary));

    if !record.committer.is_empty() && record.committer != record.author {
        md.push_str(&format!("**Committer:** {}", record.committer));
        if !record.committer_email.is_empty() {
            md.push_str(&format!(" <{}>", record.committer_email));
        }
        md.push_str("\n\n");
    }

    md.push_str("---\n\n");
    md.push_str("[View File History](command:git-history.showFileHistory)");

    HoverCard { markdown: md }
}

fn truncate_summary(summary: &str) -> String {
    if summary.chars().count() > MAX_INLINE_SUMMARY {
        let head: String = summary.chars().take(MAX_INLINE_SUMMARY).collect();
        format!("{}...", head)
    } else {
        summary.to_string()
    }
}
