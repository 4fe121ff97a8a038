#[cfg(test)]
pub mod common;
pub mod scrape_scenarios;
