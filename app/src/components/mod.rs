pub mod blog_detail;
pub mod blog_list;
pub mod create_form;
pub mod footer;
pub mod header;
pub mod icons;
pub mod navbar;
