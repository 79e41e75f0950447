//! Export contents of `utils` folder
mod utils;
mod segment;
mod polyline;

pub use self::{
    utils::*,
    segment::*,
    polyline::*,
};
