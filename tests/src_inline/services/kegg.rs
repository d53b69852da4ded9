use super::*;
use crate::test_support::{members, symbol_mapping};

const LINKS: &str = "\
mav:MAV_0001\tpath:mav00010
mav:MAV_0002\tpath:mav00010
mav:MAV_0002\tpath:mav00020
";

const NAMES: &str = "\
path:mav00010\tGlycolysis / Gluconeogenesis - Mycobacterium avium 104
mav00020\tCitrate cycle (TCA cycle) - Mycobacterium avium 104
";

const CONV: &str = "\
mav:MAV_0001\tup:A0A0H2ZXX0
mav:MAV_0002\tup:A0A0H3A1B2
mav:MAV_0002\tup:A0A0H3A1B3
";

#[test]
fn test_pathway_sets_from_link_and_list() {
    let sets = build_pathway_sets(LINKS, NAMES).unwrap();
    assert_eq!(sets.len(), 2);
    let glycolysis = members(&sets, "mav00010").unwrap();
    assert!(glycolysis.contains("MAV_0001"));
    assert!(glycolysis.contains("MAV_0002"));
    assert_eq!(sets.name("mav00010"), Some("Glycolysis / Gluconeogenesis"));
    assert_eq!(sets.name("mav00020"), Some("Citrate cycle (TCA cycle)"));
}

#[test]
fn test_conv_rekeys_to_uniprot() {
    let sets = build_pathway_sets(LINKS, NAMES).unwrap();
    let conv = parse_conv(CONV).unwrap();
    assert_eq!(conv["MAV_0002"].len(), 2);

    let rekeyed = sets.rekey(&conv);
    let tca = members(&rekeyed, "mav00020").unwrap();
    assert_eq!(tca.len(), 2);
    assert!(tca.contains("A0A0H3A1B2"));
    assert!(tca.contains("A0A0H3A1B3"));
    assert_eq!(rekeyed.name("mav00020"), Some("Citrate cycle (TCA cycle)"));
}

#[test]
fn test_rekey_drops_unmapped_genes() {
    let sets = build_pathway_sets(LINKS, NAMES).unwrap();
    let rekeyed = sets.rekey(&symbol_mapping(&[("MAV_0001", "P1")]));
    assert_eq!(rekeyed.len(), 1);
    assert!(members(&rekeyed, "mav00020").is_none());
}

#[test]
fn test_malformed_lines_are_service_errors() {
    let err = build_pathway_sets("no tab here\n", "").unwrap_err();
    assert!(matches!(err, EnrichError::Service { service: "KEGG", .. }));
}

#[test]
fn test_strip_organism_suffix() {
    assert_eq!(
        strip_organism_suffix("Ribosome - Mycobacteroides abscessus ATCC 19977"),
        "Ribosome"
    );
    assert_eq!(strip_organism_suffix("Ribosome"), "Ribosome");
}
