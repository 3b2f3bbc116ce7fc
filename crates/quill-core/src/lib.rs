//! Core library for Quill: configuration, session storage, and the blog API client.

pub mod api;
pub mod config;
pub mod session;
