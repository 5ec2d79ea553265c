//! lessonguard - validation engine for course content trees
//!
//! Walks `<content_root>/<course>/` directories, checks course metadata,
//! lesson payloads and the lessons / exercises / supplements manifests, and
//! produces a deterministic report of problems (blocking) and warnings
//! (advisory).

pub mod blocks;
pub mod cli;
pub mod documents;
pub mod findings;
pub mod manifest;
pub mod observability;
pub mod report;
pub mod runner;
