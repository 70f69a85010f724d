mod form;
mod panel;
mod status;

pub use form::MintForm;
pub use panel::panel_plugin;
pub use status::{session_plugin, SessionView, StatusLine};
