use anyhow::{Result, bail};
use clap::{arg, command, value_parser};
use std::path::PathBuf;

fn main() -> Result<()> {
    let matches = command!("maxspace check")
        .about("Checks the configuration file and prints the settings in effect")
        .help_template(maxspace::get_help_template())
        .args(&[
            arg!(-v --verbose "Outputs the received configuration file."),
            arg!([INPUT] "Sets the input file to use. Uses the default location otherwise.")
                .value_parser(value_parser!(PathBuf)),
        ])
        .get_matches();

    let verbose = matches.get_flag("verbose");
    println!(
        "\x1b[0;94m::\x1b[0m maxspace version: {}",
        env!("CARGO_PKG_VERSION")
    );

    let path = maxspace::config_path(matches.get_one::<PathBuf>("INPUT").cloned())?;
    println!("\x1b[0;94m::\x1b[0m Loading {} . . .", path.display());
    if !path.exists() {
        bail!("{} does not exist, maxspace writes the defaults there on its first start", path.display());
    }
    if verbose {
        println!("{}", std::fs::read_to_string(&path)?);
    }

    let config = match maxspace::read(&path) {
        Ok(config) => {
            println!("\x1b[0;92m    -> Configuration loaded OK \x1b[0m");
            config
        }
        Err(err) => {
            println!("\x1b[1;91mERROR:\x1b[0m\x1b[1m {err:?} \x1b[0m");
            bail!("Configuration failed");
        }
    };

    println!("\x1b[0;94m::\x1b[0m Settings in effect:");
    print!("{}", toml::to_string(&config)?);

    let warnings = config.check();
    for warning in &warnings {
        println!("\x1b[1;93mWARN: {warning}\x1b[0m");
    }
    if warnings.is_empty() {
        println!("\x1b[0;92m    -> No problems found \x1b[0m");
    }
    Ok(())
}
