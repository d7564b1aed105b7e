//! Scraper for the driving-theory question bank on drivepoint.gr.
//!
//! The categories page is read for its sidebar links, each category's
//! paginated listing is walked, and every page is turned into [`model::Question`]
//! records, preferring the embedded JSON payload over markup scraping.

pub mod config;
pub mod example;
pub mod fetch;
pub mod model;
pub mod output;
pub mod paginator;
pub mod parser;
pub mod pipeline;
