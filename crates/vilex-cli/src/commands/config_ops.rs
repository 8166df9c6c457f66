use std::fs;

pub fn settings_export() {
    print!("{}", vilex_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        vilex_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    let caps: Vec<String> = s
        .lengths
        .range()
        .filter_map(|len| s.cap_policy().cap(len).map(|max| format!("{len}={max}")))
        .collect();
    println!(
        "OK: lengths={}..={}, caps=[{}], oracle.extra={}",
        s.lengths.min,
        s.lengths.max,
        caps.join(", "),
        s.oracle.extra.len()
    );
}

pub fn exclusions_export() {
    print!("{}", vilex_core::exclusions::default_toml());
}

pub fn exclusions_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let e = die!(
        vilex_core::exclusions::parse_exclusions_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: {} blacklisted words, {} loanwords",
        e.blacklist.len(),
        e.loanwords.len()
    );
}
