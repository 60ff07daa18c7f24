//! Inference provider adapters.

pub mod openai;

pub use openai::{ApiFlavor, OpenAiChatGateway, OpenAiConfig, connect_backend};
