pub mod locale_renderer;
pub mod status;

pub use locale_renderer::LocaleRenderer;
pub use status::{StatusBanner, StatusMessage, StatusTone};
