pub mod email;
pub mod gemini;
pub mod response;
