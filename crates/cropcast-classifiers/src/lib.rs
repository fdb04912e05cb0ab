//! cropcast-classifiers: crop recommendation model training and inference.
//!
//! This crate implements the core pipeline behind the crop recommender: a
//! stratified train/test splitter, a bagged decision-tree (random forest)
//! classifier, accuracy evaluation, model persistence, and the serving-side
//! predictor. The transport that fronts the predictor lives elsewhere; this
//! crate exposes plain types at that boundary (`CropRequest`,
//! `PredictionResult`).
pub mod config;
pub mod error;
pub mod evaluate;
pub mod features;
pub mod io;
pub mod models;
pub mod predictor;
pub mod split;
pub mod store;
