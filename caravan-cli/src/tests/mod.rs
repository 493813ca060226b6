//! Shared test harness modules for the Caravan CLI.

use super::*;

mod helpers;
mod output_unit;
