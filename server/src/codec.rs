mod decode;
mod encode;

pub use self::{decode::*, encode::*};
