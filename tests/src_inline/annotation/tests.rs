use std::io::{Cursor, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::*;
use crate::model::species::Ontology;
use crate::test_support::{gene, go_ann, members, orgdb_fixture};

const GENE_INFO: &str = "\
#tax_id\tGeneID\tSymbol\tLocusTag\tSynonyms
561007\t5963121\tdnaA\tMAB_0001\t-
561007\t5963122\tdnaN\tMAB_0002\t-
561007\t5963123\t-\tMAB_0003\t-
1781\t9990001\tdnaA\tMAV_0001\t-
";

const GENE2GO: &str = "\
#tax_id\tGeneID\tGO_ID\tEvidence\tQualifier\tGO_term\tPubMed\tCategory
561007\t5963121\tGO:0006270\tIEA\tinvolved_in\tDNA replication initiation\t-\tProcess
561007\t5963121\tGO:0003688\tIEA\tenables\tDNA replication origin binding\t-\tFunction
561007\t5963122\tGO:0006260\tIEA\tNOT involved_in\tDNA replication\t-\tProcess
1781\t9990001\tGO:0006270\tIEA\tinvolved_in\tDNA replication initiation\t-\tProcess
";

const OBO: &str = "\
format-version: 1.2

[Term]
id: GO:0006260
name: DNA replication
namespace: biological_process
is_a: GO:0006259 ! DNA metabolic process

[Term]
id: GO:0006270
name: DNA replication initiation
namespace: biological_process
alt_id: GO:0000000
relationship: part_of GO:0006260 ! DNA replication

[Term]
id: GO:0006259
name: DNA metabolic process
namespace: biological_process

[Term]
id: GO:0003688
name: DNA replication origin binding
namespace: molecular_function

[Typedef]
id: part_of
name: part of
";

#[test]
fn test_gene_info_parsing_and_taxon_filter() {
    let all = parse_gene_info(Cursor::new(GENE_INFO), None).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].symbol, "dnaA");
    assert_eq!(all[2].gene_id, "9990001");

    let filtered = parse_gene_info(Cursor::new(GENE_INFO), Some(561007)).unwrap();
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|g| g.gene_id.starts_with("59631")));
}

#[test]
fn test_gene_info_rejects_bad_tax_id() {
    let err = parse_gene_info(Cursor::new("x\t1\tsym\n"), None).unwrap_err();
    assert!(matches!(err, EnrichError::Parse(_)));
}

#[test]
fn test_gene2go_skips_negated() {
    let anns = parse_gene2go(Cursor::new(GENE2GO), Some(561007)).unwrap();
    assert_eq!(anns.len(), 2);
    assert_eq!(anns[0].ontology, Ontology::Bp);
    assert_eq!(anns[1].ontology, Ontology::Mf);
    assert!(anns.iter().all(|a| a.gene_id == "5963121"));
}

#[test]
fn test_obo_parsing_and_ancestors() {
    let dag = parse_obo(Cursor::new(OBO)).unwrap();
    assert_eq!(dag.len(), 4);
    let term = dag.term("GO:0006270").unwrap();
    assert_eq!(term.name, "DNA replication initiation");
    assert_eq!(term.parents, vec!["GO:0006260".to_string()]);
    assert_eq!(dag.canonical("GO:0000000"), "GO:0006270");

    let ancestors = dag.ancestors("GO:0006270");
    assert!(ancestors.contains("GO:0006260"));
    assert!(ancestors.contains("GO:0006259"));
    assert!(!ancestors.contains("GO:0006270"));
    assert!(dag.ancestors("GO:0006259").is_empty());
}

#[test]
fn test_orgdb_propagates_to_ancestors() {
    let genes = parse_gene_info(Cursor::new(GENE_INFO), Some(561007)).unwrap();
    let anns = parse_gene2go(Cursor::new(GENE2GO), Some(561007)).unwrap();
    let dag = parse_obo(Cursor::new(OBO)).unwrap();
    let db = OrgDb::from_records(&genes, &anns, Some(&dag));

    let bp = db.go_sets(Ontology::Bp).unwrap();
    for term in ["GO:0006270", "GO:0006260", "GO:0006259"] {
        assert!(members(bp, term).unwrap().contains("5963121"), "{term}");
    }
    assert_eq!(bp.name("GO:0006259"), Some("DNA metabolic process"));

    let mf = db.go_sets(Ontology::Mf).unwrap();
    assert_eq!(mf.len(), 1);
    assert!(matches!(
        db.go_sets(Ontology::Cc),
        Err(EnrichError::MissingInput(_))
    ));
}

#[test]
fn test_orgdb_without_dag_keeps_direct_terms() {
    let db = OrgDb::from_records(
        &[gene("1", "abc")],
        &[go_ann("1", "GO:0006270", "DNA replication initiation", Ontology::Bp)],
        None,
    );
    let bp = db.go_sets(Ontology::Bp).unwrap();
    assert_eq!(bp.len(), 1);
    assert_eq!(bp.name("GO:0006270"), Some("DNA replication initiation"));
}

#[test]
fn test_obsolete_terms_are_skipped() {
    let obo = format!(
        "{OBO}\n[Term]\nid: GO:0000001\nname: obsolete mitochondrion inheritance\n\
         namespace: biological_process\nis_obsolete: true\n"
    );
    let dag = parse_obo(Cursor::new(obo)).unwrap();
    assert!(dag.term("GO:0000001").unwrap().obsolete);
    assert!(!dag.term("GO:0006270").unwrap().obsolete);

    let db = OrgDb::from_records(
        &[gene("1", "abc")],
        &[
            go_ann("1", "GO:0000001", "mitochondrion inheritance", Ontology::Bp),
            go_ann("1", "GO:0006270", "DNA replication initiation", Ontology::Bp),
        ],
        Some(&dag),
    );
    let bp = db.go_sets(Ontology::Bp).unwrap();
    assert!(members(bp, "GO:0000001").is_none());
    assert!(members(bp, "GO:0006270").unwrap().contains("1"));
    assert_eq!(bp.len(), 3);
}

#[test]
fn test_obo_without_terms_is_empty() {
    let text = "format-version: 1.2\n\n[Typedef]\nid: part_of\n";
    let dag = parse_obo(Cursor::new(text)).unwrap();
    assert!(dag.is_empty());
    assert_eq!(dag.len(), 0);
}

#[test]
fn test_symbols_to_entrez_drops_unmapped() {
    let db = orgdb_fixture();
    let symbols: Vec<String> = ["MAB_0002", "", "nope", "MAB_0001", "MAB_0002"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(db.symbols_to_entrez(&symbols), vec!["1002", "1001"]);
    assert_eq!(db.entrez_symbol("1003"), Some("MAB_0003"));
    assert_eq!(db.entrez_symbol("9"), None);
}

#[test]
fn test_load_dir_discovers_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(GENE_INFO.as_bytes()).unwrap();
    std::fs::write(dir.path().join("gene_info.gz"), enc.finish().unwrap()).unwrap();
    std::fs::write(dir.path().join("gene2go"), GENE2GO).unwrap();
    std::fs::write(dir.path().join("go-basic.obo"), OBO).unwrap();

    let paths = discover_paths(dir.path()).unwrap();
    assert!(paths.obo.is_some());

    let db = OrgDb::load_dir(dir.path(), Some(561007)).unwrap();
    assert_eq!(
        db.symbols_to_entrez(&["dnaA".to_string()]),
        vec!["5963121"]
    );
    assert_eq!(db.go_sets(Ontology::Bp).unwrap().len(), 3);
}

#[test]
fn test_load_dir_requires_gene2go() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("gene_info"), GENE_INFO).unwrap();
    assert!(matches!(
        discover_paths(dir.path()),
        Err(EnrichError::MissingInput(_))
    ));
}
