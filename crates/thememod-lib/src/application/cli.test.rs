use super::*;
use crate::primitives::ColorIntent;
use std::path::PathBuf;

#[test]
fn test_parse_graph_with_filter() {
    let cli = Cli::try_parse_from(["thememod", "graph", "--filter"]).unwrap();
    assert_eq!(cli.command, Some(Commands::Graph { filter: true }));
}

#[test]
fn test_parse_init_requires_path() {
    assert!(Cli::try_parse_from(["thememod", "init"]).is_err());

    let cli = Cli::try_parse_from(["thememod", "init", "github.com/me/site"]).unwrap();
    assert_eq!(
        cli.command,
        Some(Commands::Init {
            path: "github.com/me/site".to_string()
        })
    );
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "thememod",
        "--workdir",
        "/srv/site",
        "--import",
        "github.com/a/theme,mytheme",
        "--ignore-vendor",
        "--color",
        "never",
        "collect",
    ])
    .unwrap();

    assert_eq!(cli.config.workdir, Some(PathBuf::from("/srv/site")));
    assert_eq!(cli.config.imports, vec!["github.com/a/theme", "mytheme"]);
    assert!(cli.config.ignore_vendor);
    assert_eq!(cli.config.color, ColorIntent::Never);
    assert_eq!(cli.command, Some(Commands::Collect));
}

#[test]
fn test_no_subcommand_is_accepted() {
    let cli = Cli::try_parse_from(["thememod"]).unwrap();
    assert_eq!(cli.command, None);
    assert_eq!(cli.config.mod_proxy, "direct");
}
