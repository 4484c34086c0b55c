use std::fs;

const CONFIG_PATH: &str = "src/default_config.toml";

/// Keys `Config` reads, per table. A missing key would silently fall back to
/// the hard-coded defaults at runtime.
const REQUIRED_KEYS: &[(&str, &[&str])] = &[
    ("paths", &["content", "static", "public", "template"]),
    ("site", &["basepath"]),
];

fn main() {
    println!("cargo:rerun-if-changed={CONFIG_PATH}");

    let content = fs::read_to_string(CONFIG_PATH)
        .unwrap_or_else(|e| panic!("Failed to read {CONFIG_PATH}: {e}"));
    let config = content
        .parse::<toml::Table>()
        .unwrap_or_else(|e| panic!("Invalid {CONFIG_PATH}: {e}"));

    for (table, keys) in REQUIRED_KEYS {
        let Some(section) = config.get(*table).and_then(toml::Value::as_table) else {
            panic!("{CONFIG_PATH}: missing [{table}] table");
        };
        for key in *keys {
            if !section.get(*key).is_some_and(toml::Value::is_str) {
                panic!("{CONFIG_PATH}: [{table}] needs a string `{key}`");
            }
        }
    }
}
