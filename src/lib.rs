pub mod app;
pub mod cli;
pub mod config;
pub mod model;
pub mod output;
pub mod paginate;
pub mod query;
pub mod store;

#[cfg(test)]
mod tests;
