pub mod html_utils;
pub mod text_utils;
