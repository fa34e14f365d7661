pub mod domains;
pub mod requirements;

pub use requirements::{expertise_profile, platform_format, ExpertiseProfile};
