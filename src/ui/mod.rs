//! UI building blocks: the drawing surface, the controls and the thumbnail grid

pub mod canvas;
pub mod controls;
pub mod thumbnails;
