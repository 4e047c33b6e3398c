//! Labscope - Lab Report CSV Dashboard
//!
//! Loads a CSV of laboratory-report records, summarizes a selected column and
//! picks a chart for it: histograms for numeric columns, frequency bar charts
//! for everything else.

pub mod auth;
pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod report;
pub mod state;
pub mod stats;
