//! Config commands

use anyhow::Result;

use crate::commands::{ConfigCommands, ConfigFormatArg, load_config};
use crate::error::CliError;
use crate::output;

/// Execute config commands
pub fn execute(cmd: &ConfigCommands, json: bool) -> Result<()> {
    match cmd {
        ConfigCommands::Dump { config, format } => {
            let config = load_config(config.as_deref()).map_err(CliError::from)?;
            let rendered = match format {
                ConfigFormatArg::Yaml => config.to_yaml(),
                ConfigFormatArg::Json => config.to_json(),
            }
            .map_err(CliError::from)?;
            print!("{rendered}");
            if !rendered.ends_with('\n') {
                println!();
            }
            Ok(())
        }
        ConfigCommands::Validate { path } => {
            let config = load_config(Some(path)).map_err(CliError::from)?;
            output::print_config_valid(path, &config, json);
            Ok(())
        }
    }
}
