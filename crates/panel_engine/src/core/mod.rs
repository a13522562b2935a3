//! Core engine concerns: configuration

pub mod config;
