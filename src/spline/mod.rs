pub mod lane_deriver;

pub use lane_deriver::{CatmullRomPath, Lane, LaneDeriver, LaneSet};
