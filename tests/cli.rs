use clap::Parser;
use page_directory::{cli, cli::Args, logger, BuildError};

fn report(argv: &[&str]) -> anyhow::Result<String> {
    let args = Args::try_parse_from(argv)?;
    let mut out = Vec::new();
    cli::run(&args, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn translations_are_boxed_after_the_summary() {
    let text = report(&["page_directory", "8K", "-t", "0x1abc", "-t", "0x400000", "--no-tables"]).unwrap();
    assert!(text.starts_with("memsize = 8192, pgdiraddr = 0x100000, pgtabcnt = 1, pgcnt = 2\n\n"));
    assert!(!text.contains("MMU table"));
    assert!(text.contains("V0x1abc -> P0x502abc"));
    assert!(text.contains("V0x400000 -> fault: V0x400000 is not mapped (directory entry not present)"));
    assert!(text.contains("Translations"));
}

#[test]
fn default_run_dumps_one_table() {
    let text = report(&["page_directory"]).unwrap();
    assert!(text.contains("MMU table\n[0000]\n"));
    assert_eq!(text.lines().filter(|l| l.starts_with("1\t1\t1\t1\t0\t")).count(), 1024);
}

#[test]
fn over_capacity_size_is_reported() {
    let err = report(&["page_directory", "4097M"]).unwrap_err();
    assert!(err.to_string().contains("cannot map"));
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::CapacityExceeded { .. })
    ));
}

#[test]
fn logger_installs_once() {
    logger::init(0).unwrap();
    let err: anyhow::Error = logger::init(0).unwrap_err().into();
    assert!(!err.to_string().is_empty());
}
