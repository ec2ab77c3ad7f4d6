pub mod controller;
pub mod repositories;
