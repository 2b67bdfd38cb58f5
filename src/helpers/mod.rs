//! Helper functions shared by the renderers, pages and server

mod html;
mod url;

pub use html::*;
pub use url::*;
