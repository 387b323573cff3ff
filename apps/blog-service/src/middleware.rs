//! # ミドルウェア
//!
//! - `cors`: CORS プリフライト応答と CORS ヘッダーの付与

pub mod cors;

pub use cors::{CorsState, handle_cors};
