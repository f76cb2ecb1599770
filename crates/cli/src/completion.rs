//! Shell completion generation for clusterctl

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io;

use crate::Cli;

/// Generate shell completion script
pub fn generate_completion(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = "clusterctl";

    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
