#[cfg(test)]
mod tests {
    use crate::cli::{Cli, usage};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_short_and_long_flags() {
        let cli = Cli::try_parse_from(["nobundle", "-i", "app", "--output", "out"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("app")));
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert!(!cli.wants_usage());
    }

    #[test]
    fn test_no_arguments_wants_usage() {
        let cli = Cli::try_parse_from(["nobundle"]).unwrap();
        assert!(cli.wants_usage());
    }

    #[test]
    fn test_help_flag_wants_usage() {
        let cli = Cli::try_parse_from(["nobundle", "-h", "-i", "app"]).unwrap();
        assert!(cli.wants_usage());
    }

    #[test]
    fn test_flags_without_input_do_not_print_usage() {
        // Reported as a missing input directory instead.
        let cli = Cli::try_parse_from(["nobundle", "--verbose"]).unwrap();
        assert!(!cli.wants_usage());
        assert!(cli.input.is_none());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["nobundle", "-i", "app", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_usage_lists_options() {
        let text = usage();
        assert!(text.contains("--input"));
        assert!(text.contains("--output"));
        assert!(text.contains("--help"));
        assert!(text.contains("non-bundled"));
    }
}
