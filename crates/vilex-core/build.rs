fn main() {
    println!("cargo:rerun-if-changed=src/default_settings.toml");
    println!("cargo:rerun-if-changed=src/default_exclusions.toml");

    check_tables(
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
        &["lengths", "resolver", "oracle", "classifier"],
    );
    check_tables(
        "src/default_exclusions.toml",
        include_str!("src/default_exclusions.toml"),
        &["blacklist", "loanwords"],
    );
}

/// The embedded defaults must parse and carry every required section.
fn check_tables(path: &str, content: &str, required: &[&str]) {
    let value: toml::Table = match content.parse() {
        Ok(v) => v,
        Err(e) => panic!("{path} contains invalid TOML: {e}"),
    };
    for section in required {
        if !value.get(*section).is_some_and(toml::Value::is_table) {
            panic!("{path} is missing the [{section}] table");
        }
    }
}
