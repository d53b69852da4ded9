use clap::CommandFactory;

use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("myco-enrich").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_cli_definition() {
    Cli::command().debug_assert();
}

#[test]
fn test_run_defaults() {
    let cli = parse(&[
        "run",
        "--input",
        "proteins.csv",
        "--out-prefix",
        "out/run1",
        "--species",
        "avium",
    ]);
    assert!(!cli.verbose);
    let services = service_config(&cli.service);
    assert_eq!(services.uniprot_url, DEFAULT_UNIPROT_URL);
    assert_eq!(services.timeout, Duration::from_secs(config::DEFAULT_TIMEOUT_SECS));
    let Command::Run(args) = cli.command else {
        panic!("expected run");
    };
    let config = run_config(args, services);
    assert_eq!(config.output_prefix, "out/run1");
    assert_eq!(config.species, "avium");
    assert!(config.options.do_kegg);
    assert!(!config.options.do_go);
    assert_eq!(config.options.ontology, Ontology::Bp);
    assert_eq!(config.options.params.adjust, AdjustMethod::BenjaminiHochberg);
    assert_eq!(config.options.params.min_gs_size, 10);
    assert_eq!(config.options.params.max_gs_size, 500);
    assert!(config.orgdb.dir.is_none());
}

#[test]
fn test_run_flags() {
    let cli = parse(&[
        "--verbose",
        "run",
        "--input",
        "proteins.tsv",
        "--out-prefix",
        "x",
        "--species",
        "abscessus",
        "--no-kegg",
        "--go",
        "--ontology",
        "mf",
        "--p-adjust",
        "bonferroni",
        "--pvalue-cutoff",
        "0.01",
        "--orgdb",
        "db",
        "--orgdb-taxon",
        "561007",
        "--kegg-url",
        "http://localhost:9000",
    ]);
    assert!(cli.verbose);
    let services = service_config(&cli.service);
    assert_eq!(services.kegg_url, "http://localhost:9000");
    let Command::Run(args) = cli.command else {
        panic!("expected run");
    };
    let config = run_config(args, services);
    assert!(!config.options.do_kegg);
    assert!(config.options.do_go);
    assert_eq!(config.options.ontology, Ontology::Mf);
    assert_eq!(config.options.params.adjust, AdjustMethod::Bonferroni);
    assert_eq!(config.options.params.pvalue_cutoff, 0.01);
    assert_eq!(config.orgdb.dir, Some(PathBuf::from("db")));
    assert_eq!(config.orgdb.taxon, Some(561007));
}

#[test]
fn test_invalid_ontology_rejected() {
    let err = Cli::try_parse_from([
        "myco-enrich",
        "run",
        "--input",
        "a.csv",
        "--out-prefix",
        "x",
        "--species",
        "avium",
        "--ontology",
        "XX",
    ]);
    assert!(err.is_err());
}

#[test]
fn test_map_subcommand() {
    let cli = parse(&[
        "map",
        "--input",
        "a.csv",
        "--species",
        "abscessus",
        "--to",
        "entrez",
        "--out",
        "ids.txt",
    ]);
    let services = service_config(&cli.service);
    let Command::Map(args) = cli.command else {
        panic!("expected map");
    };
    let config = map_config(args, services);
    assert_eq!(config.target, MapTarget::Entrez);
    assert_eq!(config.out, Some(PathBuf::from("ids.txt")));
}

#[test]
fn test_load_orgdb_skipped_for_avium() {
    let config = OrgDbConfig {
        dir: Some(PathBuf::from("/nonexistent/orgdb")),
        taxon: None,
    };
    assert!(load_orgdb(&config, "avium").unwrap().is_none());
    assert!(load_orgdb(&OrgDbConfig::default(), "abscessus").unwrap().is_none());
    assert!(load_orgdb(&config, "abscessus").is_err());
}
