pub mod collections;
pub mod slides;
pub mod study;
