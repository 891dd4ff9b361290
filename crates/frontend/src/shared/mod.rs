pub mod components;
pub mod icons;
pub mod json_viewer;
pub mod storage;
