pub mod common;
pub mod config;
pub mod milestones;
pub mod projects;
pub mod routes;
pub mod seed;

#[cfg(test)]
mod test_helpers;
