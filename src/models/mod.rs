pub mod attendance;
pub mod bucket;
pub mod gender;
pub mod holiday;
pub mod member;
pub mod period;
pub mod risk;
pub mod slot_type;
pub mod snapshot;
