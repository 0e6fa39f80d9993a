pub mod text_view;
pub mod view;
