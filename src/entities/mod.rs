mod location;
mod map;
mod place;

pub use location::Coordinates;
pub use map::{Marker, Region, ScreenPoint, Span};
pub use place::Place;
