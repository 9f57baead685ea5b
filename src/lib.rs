//! pc-builder-ai: PC-build, chat and blog prompts relayed to an LLM, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
