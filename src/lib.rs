//! Photobooth Admin
//!
//! Admin console for a photobooth-rental business. Staff sign in, work
//! through booking leads, curate the public gallery, and write blog posts,
//! all against a remote REST API.
//!
//! This library provides:
//! - Session persistence and the route guard
//! - Typed clients for the leads, gallery, posts and categories endpoints
//! - A list controller with optimistic status updates and pagination
//! - Client-side image compression before upload
//! - The Dioxus web UI (`app`)

pub mod analytics;
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod guard;
pub mod list;
pub mod models;
pub mod notify;
pub mod session;
pub mod upload;
