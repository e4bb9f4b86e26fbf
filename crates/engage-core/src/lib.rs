//! # engage-core
//!
//! Developer tooling for the Supporter Engagement platform.
//!
//! This crate provides:
//! - Running CDK synthesis and scraping logical resource IDs for DynamoDB
//!   tables and S3 buckets from its output
//! - A scenario-driven HTTP smoke tester for the deployed personalization API

pub mod resource_ids;
pub mod smoke;
mod synth;

pub use resource_ids::{ExtractedResources, ResourceKind, ResourceMatch, extract, find_resources};
pub use synth::{DEFAULT_STACK, SynthCommand, SynthError, SynthOutput};
