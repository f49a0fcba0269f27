mod shared;
mod template;
mod tracker;

pub use shared::entity::{Entity, ID};
pub use template::{
    default_template, render_template, EmailTemplate, RenderedEmail, TemplateValues,
    DEFAULT_PRODUCT_LINK, DEFAULT_PRODUCT_PHRASE, DEFAULT_REVIEW_LINK, DEFAULT_SALUTATION,
};
pub use tracker::{
    day_bounds, CustomerContact, InvalidStageError, InvalidStatusTransition, ProductContext,
    ReminderStage, ReminderTracker, StageRecord, StageRecords, TrackerStatus, DAY_MILLIS,
};
