pub mod adjust;
pub mod go;
pub mod kegg;
pub mod ora;

pub use go::go_enrichment;
pub use kegg::kegg_enrichment;
