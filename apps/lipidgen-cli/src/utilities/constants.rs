pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default project config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "lipidgen.config.toml";

/// Generated artifact file names, one per reference table.
pub const LIPID_CLASSES_FILE: &str = "lipid_classes.rs";
pub const TRIVIAL_NAMES_FILE: &str = "trivial_names.rs";
pub const FUNCTIONAL_GROUPS_FILE: &str = "functional_groups.rs";
