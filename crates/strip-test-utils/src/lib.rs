//! Shared test utilities for the buildstrip workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not each
//! grow their own temp-directory helpers. It is a dev-dependency only, never
//! published.
//!
//! # Modules
//!
//! - [`project`]: [`project::TestProject`] builder for source trees with markers
//! - [`sources`]: canned source files used across suites

pub mod project;
pub mod sources;
