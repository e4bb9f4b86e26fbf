//! Logical resource ID extraction from synthesized CDK templates.
//!
//! Scrapes the YAML that `cdk synth` prints for DynamoDB tables and S3 buckets:
//!
//! ```text
//! Resources:
//!   UserProfilesTable3F1A2B4C:
//!     Type: AWS::DynamoDB::Table
//!     Properties:
//!       TableName: supporter-user-profiles
//! ```
//!
//! Matching is purely textual and depends on the two-space indentation CDK
//! emits for resource entries. It is not a YAML parser.

use std::io::{self, Write};
use std::sync::LazyLock;

use regex::Regex;

static TABLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&ResourceKind::Table.pattern_source()).expect("valid table regex"));

static BUCKET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&ResourceKind::Bucket.pattern_source()).expect("valid bucket regex"));

const RULE: &str = "============================================================";

/// Kind of infrastructure resource scraped from the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Table,
    Bucket,
}

impl ResourceKind {
    /// CloudFormation type name.
    pub fn type_name(self) -> &'static str {
        match self {
            ResourceKind::Table => "AWS::DynamoDB::Table",
            ResourceKind::Bucket => "AWS::S3::Bucket",
        }
    }

    /// Property key that carries the physical name.
    pub fn name_key(self) -> &'static str {
        match self {
            ResourceKind::Table => "TableName",
            ResourceKind::Bucket => "BucketName",
        }
    }

    /// Two-space-indented logical ID, the type line, then the nearest name key.
    fn pattern_source(self) -> String {
        format!(
            r"(?s)  (\w+):\s+Type: {}.*?{}: (\S+)",
            regex::escape(self.type_name()),
            self.name_key()
        )
    }

    fn pattern(self) -> &'static Regex {
        match self {
            ResourceKind::Table => &*TABLE_PATTERN,
            ResourceKind::Bucket => &*BUCKET_PATTERN,
        }
    }

    fn section_header(self) -> &'static str {
        match self {
            ResourceKind::Table => "📊 DynamoDB Tables:",
            ResourceKind::Bucket => "🪣 S3 Buckets:",
        }
    }

    fn name_label(self) -> &'static str {
        match self {
            ResourceKind::Table => "Table Name",
            ResourceKind::Bucket => "Bucket Name",
        }
    }
}

/// A logical ID paired with the physical name found after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMatch {
    pub kind: ResourceKind,
    pub logical_id: String,
    pub physical_name: String,
}

/// All matches found in one synthesis output, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedResources {
    pub tables: Vec<ResourceMatch>,
    pub buckets: Vec<ResourceMatch>,
}

impl ExtractedResources {
    /// Returns the matches for one kind, in document order.
    pub fn of_kind(&self, kind: ResourceKind) -> &[ResourceMatch] {
        match kind {
            ResourceKind::Table => &self.tables,
            ResourceKind::Bucket => &self.buckets,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.buckets.is_empty()
    }
}

/// Finds every non-overlapping match of `kind` in `text`, in document order.
///
/// Duplicates are returned as-is.
pub fn find_resources(text: &str, kind: ResourceKind) -> Vec<ResourceMatch> {
    kind.pattern()
        .captures_iter(text)
        .map(|caps| ResourceMatch {
            kind,
            logical_id: caps[1].to_string(),
            physical_name: caps[2].to_string(),
        })
        .collect()
}

/// Extracts tables and buckets from synthesis output.
pub fn extract(text: &str) -> ExtractedResources {
    let resources = ExtractedResources {
        tables: find_resources(text, ResourceKind::Table),
        buckets: find_resources(text, ResourceKind::Bucket),
    };
    tracing::debug!(
        tables = resources.tables.len(),
        buckets = resources.buckets.len(),
        "Extracted resources from synthesis output"
    );
    resources
}

/// Writes the banner printed before synthesis starts.
pub fn write_banner<W: Write>(mut out: W) -> io::Result<()> {
    writeln!(out, "🔍 Extracting Logical Resource IDs from CDK template")?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    Ok(())
}

/// Writes the resource sections and trailing note.
///
/// Every section header is written even when it has no entries.
pub fn write_report<W: Write>(resources: &ExtractedResources, mut out: W) -> io::Result<()> {
    for kind in [ResourceKind::Table, ResourceKind::Bucket] {
        writeln!(out, "{}", kind.section_header())?;
        writeln!(out)?;
        for found in resources.of_kind(kind) {
            writeln!(out, "  Logical ID: {}", found.logical_id)?;
            writeln!(out, "  {}: {}", kind.name_label(), found.physical_name)?;
            writeln!(out)?;
        }
    }

    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    writeln!(out, "💡 Use these Logical IDs in the import configuration")?;
    writeln!(out)?;
    out.flush()
}
