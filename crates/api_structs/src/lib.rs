mod status;
mod template;
mod tracker;
mod trigger;

pub mod dtos {
    pub use crate::template::dtos::*;
    pub use crate::tracker::dtos::*;
    pub use crate::trigger::dtos::*;
}

pub use crate::status::api::*;
pub use crate::template::api::*;
pub use crate::tracker::api::*;
pub use crate::trigger::api::*;
