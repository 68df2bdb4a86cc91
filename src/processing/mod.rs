//! Skill extraction, embeddings and scoring

pub mod normalizer;
pub mod vocabulary;
pub mod skills;
pub mod similarity;
pub mod embeddings;
pub mod embedding_manager;
pub mod scoring;
pub mod recommendations;
pub mod analyzer;
