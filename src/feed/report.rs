//! Feed report
//!
//! The generator never logs; it records what it emitted and what it skipped so the host
//! can count and log those decisions.

use std::{fmt, io};

use rust_decimal::{Decimal, RoundingStrategy};
use tabled::{builder::Builder, settings::Style};

/// Why an entry was left out of the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The product is soft-deleted
    Inactive,

    /// The entry has no title
    EmptyTitle,

    /// The entry has no image link
    MissingImage,

    /// The resolved price is zero or below
    NotSellable,
}

impl SkipReason {
    /// Stable identifier of the reason.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::EmptyTitle => "empty_title",
            Self::MissingImage => "missing_image",
            Self::NotSellable => "not_sellable",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A skipped base or variant entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    /// Product the entry belonged to
    pub product_id: String,

    /// Variant, for variant entries
    pub variant_id: Option<String>,

    /// Why the entry was skipped
    pub reason: SkipReason,
}

/// Emitted and skipped entries of one feed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedReport {
    entries: usize,
    skipped: Vec<Skip>,
}

impl FeedReport {
    pub(crate) fn record_entry(&mut self) {
        self.entries += 1;
    }

    pub(crate) fn record_skip(
        &mut self,
        product_id: &str,
        variant_id: Option<&str>,
        reason: SkipReason,
    ) {
        self.skipped.push(Skip {
            product_id: product_id.to_string(),
            variant_id: variant_id.map(ToString::to_string),
            reason,
        });
    }

    /// Number of entries written to the feed.
    #[must_use]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Skipped entries, in the order they were encountered.
    #[must_use]
    pub fn skipped(&self) -> &[Skip] {
        &self.skipped
    }

    /// Number of skipped entries with the given reason.
    #[must_use]
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped
            .iter()
            .filter(|skip| skip.reason == reason)
            .count()
    }
}

/// Summary of a rendered feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedStats {
    /// Entries written
    pub entries: usize,

    /// Entries skipped
    pub skipped: usize,

    /// Size of the serialized document in bytes
    pub bytes: usize,
}

impl FeedStats {
    /// Build stats from a report and the serialized document.
    #[must_use]
    pub fn new(report: &FeedReport, body: &str) -> Self {
        Self {
            entries: report.entries(),
            skipped: report.skipped().len(),
            bytes: body.len(),
        }
    }

    /// Size in kibibytes, to two decimal places.
    #[must_use]
    pub fn kilobytes(&self) -> Decimal {
        (Decimal::from(self.bytes) / Decimal::from(1024))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Write the stats as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["Entries", "Skipped", "Feed Size"]);
        builder.push_record([
            self.entries.to_string(),
            self.skipped.to_string(),
            format!("{:.2} KB", self.kilobytes()),
        ]);

        let mut table = builder.build();
        table.with(Style::modern_rounded());

        writeln!(out, "{table}")
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn counts_skips_by_reason() {
        let mut report = FeedReport::default();

        report.record_entry();
        report.record_entry();
        report.record_skip("p1", None, SkipReason::MissingImage);
        report.record_skip("p2", Some("v1"), SkipReason::MissingImage);
        report.record_skip("p3", None, SkipReason::NotSellable);

        assert_eq!(report.entries(), 2);
        assert_eq!(report.skipped_for(SkipReason::MissingImage), 2);
        assert_eq!(report.skipped_for(SkipReason::Inactive), 0);
        assert_eq!(
            report.skipped().get(1).and_then(|skip| skip.variant_id.as_deref()),
            Some("v1")
        );
    }

    #[test]
    fn stats_report_size_in_kilobytes() {
        let mut report = FeedReport::default();
        report.record_entry();

        let body = "x".repeat(3_000);
        let stats = FeedStats::new(&report, &body);

        assert_eq!(stats.entries, 1);
        assert_eq!(stats.skipped, 0);
        assert_eq!(stats.kilobytes().to_string(), "2.93");
    }

    #[test]
    fn stats_table_lists_counts() -> TestResult {
        let stats = FeedStats {
            entries: 12,
            skipped: 3,
            bytes: 2048,
        };

        let mut out = Vec::new();
        stats.write_to(&mut out)?;

        let table = String::from_utf8(out)?;

        assert!(table.contains("Entries"), "missing header: {table}");
        assert!(table.contains("12"), "missing entries: {table}");
        assert!(table.contains("2.00 KB"), "missing size: {table}");

        Ok(())
    }
}
