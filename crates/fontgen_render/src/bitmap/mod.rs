pub mod intensity;
pub mod pack;
