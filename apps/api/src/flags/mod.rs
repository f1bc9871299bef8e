pub mod definition;
pub mod handlers;
pub mod industry;
pub mod report;
pub mod service;
