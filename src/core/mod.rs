pub mod gemini;
pub mod services;
pub mod traits;
