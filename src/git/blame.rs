//! Parser for `git blame --line-porcelain` output.
//!
//! Every source line gets its own block: a header `<40-hex id> <orig> <final> [<count>]`,
//! then `key value` fields, then the line's content prefixed by a tab. The
//! tab line commits the accumulated fields for the header's final line number.
//! Fields that are absent from a block keep the previous block's values.

use chrono::Utc;
use thiserror::Error;

use crate::git::repository::{format_iso_date, format_relative_time_since};
use crate::models::{AttributionRecord, FileAttributionTable};

const SHORT_ID_LEN: usize = 8;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BlameParseError {
    #[error("line {0}: malformed commit header")]
    Header(usize),

    #[error("line {0}: invalid author-time")]
    AuthorTime(usize),
}

/// Parse porcelain output into a per-line table.
///
/// Never fails: malformed output yields an empty table.
pub fn parse_blame_output(output: &str) -> FileAttributionTable {
    parse_blame_output_at(output, Utc::now().timestamp())
}

/// Same as [`parse_blame_output`] with relative ages measured from `now`.
pub fn parse_blame_output_at(output: &str, now: i64) -> FileAttributionTable {
    match try_parse_blame_output(output, now) {
        Ok(table) => table,
        Err(e) => {
            tracing::warn!("Discarding unparseable blame output: {}", e);
            FileAttributionTable::default()
        }
    }
}

#[derive(Default)]
struct Block {
    full_id: String,
    author: String,
    author_email: String,
    relative_date: String,
    date_iso: String,
    author_time: i64,
    summary: String,
    committer: String,
    committer_email: String,
    line: Option<u32>,
}

impl Block {
    fn record(&self) -> AttributionRecord {
        AttributionRecord {
            short_id: self.full_id.chars().take(SHORT_ID_LEN).collect(),
            full_id: self.full_id.clone(),
            author: self.author.clone(),
            author_email: self.author_email.clone(),
            relative_date: self.relative_date.clone(),
            date_iso: self.date_iso.clone(),
            author_time: self.author_time,
            summary: self.summary.clone(),
            committer: self.committer.clone(),
            committer_email: self.committer_email.clone(),
        }
    }
}

fn try_parse_blame_output(output: &str, now: i64) -> Result<FileAttributionTable, BlameParseError> {
    let mut table = FileAttributionTable::default();
    let mut block = Block::default();

    for (idx, line) in output.lines().enumerate() {
        let lineno = idx + 1;

        if line.starts_with('\t') {
            if let Some(target) = block.line {
                table.insert(target, block.record());
            }
        } else if is_commit_header(line) {
            let mut parts = line.split(' ');
            let id = parts.next().unwrap_or_default();
            let final_line = parts
                .nth(1)
                .and_then(|n| n.parse::<u32>().ok())
                .filter(|&n| n >= 1)
                .ok_or(BlameParseError::Header(lineno))?;

            block.full_id = id.to_string();
            block.line = Some(final_line - 1);
        } else if let Some(value) = line.strip_prefix("author-mail ") {
            block.author_email = strip_angle_brackets(value);
        } else if let Some(value) = line.strip_prefix("author-time ") {
            let timestamp = value
                .trim()
                .parse::<i64>()
                .map_err(|_| BlameParseError::AuthorTime(lineno))?;
            block.author_time = timestamp;
            block.relative_date = format_relative_time_since(timestamp, now);
            block.date_iso = format_iso_date(timestamp);
        } else if let Some(value) = line.strip_prefix("author ") {
            block.author = value.to_string();
        } else if let Some(value) = line.strip_prefix("committer-mail ") {
            block.committer_email = strip_angle_brackets(value);
        } else if let Some(value) = line.strip_prefix("committer ") {
            block.committer = value.to_string();
        } else if let Some(value) = line.strip_prefix("summary ") {
            block.summary = value.to_string();
        }
    }

    Ok(table)
}

fn is_commit_header(line: &str) -> bool {
    line.len() >= 40
        && line.as_bytes()[..40]
            .iter()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b))
}

fn strip_angle_brackets(value: &str) -> String {
    value.replace(['<', '>'], "")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID_A: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f9012345678";
    const ID_B: &str = "0000000000000000000000000000000000000000";
    const NOW: i64 = 1_704_067_200 + 3 * 86400;

    fn block(id: &str, orig: u32, fin: u32, author: &str, committer: &str, summary: &str) -> String {
        format!(
            "{id} {orig} {fin} 1\n\
             author {author}\n\
             author-mail <{author_lc}@example.com>\n\
             author-time 1704067200\n\
             author-tz +0000\n\
             committer {committer}\n\
             committer-mail <{committer_lc}@example.com>\n\
             committer-time 1704067200\n\
             committer-tz +0000\n\
             summary {summary}\n\
             filename src/lib.rs\n\
             \tline content {fin}\n",
            author_lc = author.to_lowercase(),
            committer_lc = committer.to_lowercase(),
        )
    }

    #[test]
    fn test_one_record_per_content_line() {
        let output = [
            block(ID_A, 1, 1, "Alice", "Alice", "initial import"),
            block(ID_B, 1, 2, "Not Committed Yet", "Not Committed Yet", "Version of src/lib.rs from src/lib.rs"),
            block(ID_A, 3, 3, "Alice", "Bob", "initial import"),
        ]
        .concat();

        let table = parse_blame_output_at(&output, NOW);
        assert_eq!(table.len(), 3);

        let first = table.get(0).unwrap();
        assert_eq!(first.full_id, ID_A);
        assert_eq!(first.short_id, "a1b2c3d4");
        assert_eq!(first.author, "Alice");
        assert_eq!(first.author_email, "alice@example.com");
        assert_eq!(first.relative_date, "3 days ago");
        assert_eq!(first.date_iso, "2024-01-01T00:00:00.000Z");
        assert_eq!(first.summary, "initial import");

        assert_eq!(table.get(1).unwrap().full_id, ID_B);

        let third = table.get(2).unwrap();
        assert_eq!(third.committer, "Bob");
        assert_eq!(third.committer_email, "bob@example.com");
        assert!(table.get(3).is_none());
    }

    #[test]
    fn test_line_number_is_final_position_minus_one() {
        let output = block(ID_A, 7, 12, "Alice", "Alice", "moved");
        let table = parse_blame_output_at(&output, NOW);
        assert_eq!(table.len(), 1);
        assert!(table.get(11).is_some());
    }

    #[test]
    fn test_content_line_that_looks_like_a_field() {
        let output = format!(
            "{ID_A} 1 1 1\nauthor Alice\nauthor-time 1704067200\nsummary real\n\tsummary fake\n"
        );
        let table = parse_blame_output_at(&output, NOW);
        assert_eq!(table.get(0).unwrap().summary, "real");
    }

    #[test]
    fn test_malformed_header_yields_empty_table() {
        let output = format!("{ID_A} 1 x 1\nauthor Alice\n\tcontent\n");
        assert_eq!(
            try_parse_blame_output(&output, NOW),
            Err(BlameParseError::Header(1))
        );
        assert!(parse_blame_output_at(&output, NOW).is_empty());
    }

    #[test]
    fn test_bad_author_time_yields_empty_table() {
        let output = format!(
            "{}{ID_A} 2 2 1\nauthor-time soon\n\tcontent\n",
            block(ID_A, 1, 1, "Alice", "Alice", "ok")
        );
        assert!(parse_blame_output_at(&output, NOW).is_empty());
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_blame_output("").is_empty());
    }

    #[test]
    fn test_real_blame_output() -> anyhow::Result<()> {
        use crate::git::testing::FixtureRepo;
        use crate::git::command::{GitCli, GitQuery};

        let fixture = FixtureRepo::new()?;
        let first = fixture.commit_file("a.txt", "one\ntwo\n", "first", "Alice", 1_700_000_000)?;
        let second =
            fixture.commit_file("a.txt", "one\nTWO\nthree\n", "second", "Bob", 1_700_000_100)?;

        let output = GitCli::default().blame(fixture.root(), "a.txt")?;
        let table = parse_blame_output(&output);

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0).unwrap().full_id, first.to_string());
        assert_eq!(table.get(0).unwrap().author, "Alice");
        assert_eq!(table.get(1).unwrap().full_id, second.to_string());
        assert_eq!(table.get(2).unwrap().summary, "second");
        Ok(())
    }
}
