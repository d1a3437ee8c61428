pub mod branch;
pub mod buckets;
pub mod geo;
pub mod lead;
pub mod score;
