//! Process exit codes (BSD sysexits.h compatible)

/// Cart data failed validation or the snapshot is malformed
pub const DATAERR: i32 = 65;

/// Input file does not exist
pub const NOINPUT: i32 = 66;

/// Allocation ran but did not reconcile
pub const SOFTWARE: i32 = 70;

/// File could not be read, created or written
pub const IOERR: i32 = 74;

/// Settings could not be loaded
pub const CONFIG: i32 = 78;
