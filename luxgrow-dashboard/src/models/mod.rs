mod actuator;
mod series;
mod snapshot;

pub use actuator::*;
pub use series::*;
pub use snapshot::*;
