pub mod touch;

pub use touch::{TouchAction, TouchState};
