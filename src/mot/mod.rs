//! Export contents of `mot` folder
mod mot_errors;
mod detection;
mod center_history;
mod track;
mod simple;

pub use self::{
    mot_errors::*,
    detection::*,
    center_history::*,
    track::*,
    simple::*,
};
