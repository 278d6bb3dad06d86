pub mod composite;
pub mod property;
pub mod zones;

pub use composite::CompositeState;
pub use property::AdaptiveProperty;
pub use zones::{ZoneSpec, Zones, ZonesBuilder};
