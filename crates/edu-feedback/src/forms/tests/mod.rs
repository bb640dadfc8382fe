mod common;
mod schema;
mod service;
