pub mod unweighted;
pub mod weighted;
