//! Front-end glue shared by the `faqbot` and `faqbot-chat` binaries.

pub mod args;
pub mod bootstrap;
pub mod render;
