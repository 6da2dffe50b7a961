pub mod batch;
pub mod clean;
pub mod design;
pub mod info;
