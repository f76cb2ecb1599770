//! Mode and scenario listings

use anyhow::Result;
use opencluster::Scenario;
use opencluster::modes::ModeCatalog;

use crate::output;

/// List the stock terrain modes
pub fn execute_modes(json: bool) -> Result<()> {
    let catalog = ModeCatalog::stock();
    output::print_modes(&catalog, json)
}

/// List the stock scenarios
pub fn execute_scenarios(json: bool) -> Result<()> {
    output::print_scenarios(&Scenario::ALL, json)
}
