//! Live adapters that call real model endpoints.

pub mod openai;
