//! Shared test harness modules for the Fairweather CLI.

use super::*;

mod helpers;
