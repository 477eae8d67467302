pub mod model;
pub mod query;
pub mod rules;
pub mod service;
pub mod store;
