pub mod field;
pub mod observation;
pub mod record;
pub mod step;
