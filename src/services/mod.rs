// src/services/mod.rs

pub mod extractor;
pub mod llm;
pub mod quiz_generator;
pub mod storage;
