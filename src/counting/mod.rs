//! Export contents of `counting` folder
mod line;
mod counter;

pub use self::{
    line::*,
    counter::*,
};
