//! Small helpers shared by the command drivers.

pub mod html;
pub mod mime;
pub mod path;
