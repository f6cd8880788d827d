#![warn(clippy::pedantic)]

pub mod battery;
pub mod clean_speed;
pub mod registry;
pub mod water_tank;
pub mod work_status;

pub use battery::BatteryDecoder;
pub use clean_speed::CleanSpeedDecoder;
pub use registry::{DecoderRegistry, KeyDecoder};
pub use water_tank::{TankScale, WaterTankDecoder};
pub use work_status::WorkStatusDecoder;
