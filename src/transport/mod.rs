mod client;
mod basic;

pub use client::HttpTransport;
pub use basic::ReqwestTransport;
