#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! HTTP client for the embedding-similarity collaborator.
//!
//! The service owns the embedding model; this crate only ships queries
//! over and filters the answers to the relevance floor. When the service
//! is down the caller degrades to lexical-only ranking.

mod client;

pub use client::SimilarityClient;
