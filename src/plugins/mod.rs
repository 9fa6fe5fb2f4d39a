pub mod extensions;
pub mod openurl;
pub mod tabs;
