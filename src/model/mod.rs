pub mod gene_sets;
pub mod params;
pub mod result;
pub mod species;
