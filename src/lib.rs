//! taxonomy-contrib - taxonomy contributions as GitHub pull requests
//!
//! Turns structured knowledge and skill submissions into pull requests
//! against an upstream taxonomy repository, without the contributor
//! touching git:
//!
//! 1. [`document`] serializes the submission to YAML plus an attribution file
//! 2. [`publish`] forks, branches, commits and opens (or amends) the PR
//! 3. [`taxonomy`] walks the upstream tree for browsing
//!
//! All network access goes through the [`platform::HostingService`] trait,
//! which carries the contributor's credential explicitly.

pub mod auth;
pub mod config;
pub mod document;
pub mod error;
pub mod platform;
pub mod publish;
pub mod taxonomy;
pub mod types;
