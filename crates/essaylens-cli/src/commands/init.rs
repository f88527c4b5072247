//! The `essaylens init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("essaylens.toml").exists() {
        println!("essaylens.toml already exists, skipping.");
    } else {
        std::fs::write("essaylens.toml", SAMPLE_CONFIG)?;
        println!("Created essaylens.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust db_path in essaylens.toml if needed");
    println!("  2. Run: essaylens evaluate --text \"Your essay text here...\"");
    println!("  3. Run: essaylens list");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# essaylens configuration

# Where submissions are stored.
db_path = "./essaylens.db"

# Level applied when a submission doesn't specify one: undergrad or mba.
default_level = "undergrad"

# Max concurrent evaluations in multi-file runs.
parallelism = 4
"#;
