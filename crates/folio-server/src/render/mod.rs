//! Server-side rendering: template store + content-negotiated dispatcher.
//!
//! Re-exports the store and dispatcher so handlers can depend on this module
//! directly.

pub mod dispatcher;
pub mod store;

pub use dispatcher::{is_fragment_request, Dispatcher, RenderMode, Rendered, HX_REQUEST};
pub use store::TemplateStore;
