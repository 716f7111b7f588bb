//! EV range estimator: a single-page web front-end over a pre-trained
//! TorchScript regression pipeline.

pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod page;
pub mod predict;
pub mod record;
pub mod server;
pub mod showcase;
pub mod types;
