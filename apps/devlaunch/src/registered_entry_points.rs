// Links every entry-point crate into the launcher binaries so their
// `entry_point!` registrations reach the inventory.
// Add a line here (behind a feature) for each new entry-point crate.
#![allow(unused_imports)]

#[cfg(feature = "echo-entry")]
use echo_entry as _;
