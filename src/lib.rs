//! Lead Enrichment API Library
//!
//! This library provides the core functionality for the Lead Enrichment API:
//! website discovery and scraping, prompt construction, Gemini-backed lead
//! analysis with deterministic fallbacks, and the HTTP handlers that expose
//! the pipeline.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core business logic.
//! - `integrations`: External service integrations.
//! - `config`: Configuration management.
//! - `enrichment`: Lead enrichment orchestration.
//! - `errors`: Error handling types.
//! - `gemini_client`: Gemini generateContent API client.
//! - `handlers`: HTTP request handlers.
//! - `models`: Core data models.
//! - `prompt`: Analysis prompt construction.
//! - `services`: Website resolver and content extractor.

pub mod api;
pub mod core;
pub mod integrations;

// Re-export primary modules for shared use in tests
pub mod config;
pub mod enrichment;
pub mod errors;
pub mod gemini_client;
pub mod handlers;
pub mod models;
pub mod prompt;
pub mod services;
