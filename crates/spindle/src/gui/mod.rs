pub mod app;
pub mod carousel;
pub mod pointer;
pub mod theme;
