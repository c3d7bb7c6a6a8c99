#![allow(dead_code)]

pub mod config;
pub mod mock_openai;
pub mod mock_speech;
pub mod server;
