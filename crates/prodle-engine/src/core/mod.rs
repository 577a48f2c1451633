pub use self::{candidate::*, compare::*, difficulty::*, input::*, scoring::*};

pub(crate) mod candidate;
pub(crate) mod compare;
pub(crate) mod difficulty;
pub(crate) mod input;
pub(crate) mod scoring;
