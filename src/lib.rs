pub mod file;
pub mod gui;
pub mod math;
pub mod model;
pub mod orbital_data;
