//! daylist: a self-hosted personal task management server.
//!
//! The heart of the crate is [`db::Store`], a relational persistence core
//! over SQLite: tasks grouped into lists, tagged with labels, carrying
//! subtasks, reminders, attachments, and an append-only change history.
//! [`api`] exposes it over HTTP; [`views`] computes date-based perspectives
//! on the client side of the store contract.

pub mod api;
pub mod db;
pub mod models;
pub mod seed;
pub mod views;
