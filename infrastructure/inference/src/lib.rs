pub mod anthropic;
pub mod client;
pub mod gemini;
pub mod openai;
