pub mod crop;
pub mod environmental;
pub mod irrigation;
pub mod market;
pub mod rotation;
pub mod soil;
pub mod yield_estimate;

pub use crop::*;
pub use environmental::*;
pub use irrigation::*;
pub use market::*;
pub use rotation::*;
pub use soil::*;
pub use yield_estimate::*;
