//! Device metrics: the static descriptor table, the per-scrape samples and
//! their rendering into the text exposition format.

pub mod descriptors;
pub mod render;
pub mod sample;
