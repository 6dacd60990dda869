mod client;
mod page;

pub use client::{ActionResponse, ApiClient};
pub use page::PageMeta;
