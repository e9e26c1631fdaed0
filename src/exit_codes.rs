//! Exit code registry
//!
//! Zabbix runs these tools unattended, so the exit status is the only
//! failure signal it sees besides the log.
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | Success                                   |
//! | 1    | General error                             |
//! | 2    | Usage error (bad arguments)               |
//! | 3    | Configuration error                       |
//! | 4    | Zabbix frontend error                     |
//! | 5    | Mail delivery error                       |
//! | 6    | SMS gateway transport or protocol error   |
//! | 7    | SMS gateway rejected the message          |

/// Success
pub const EXIT_SUCCESS: u8 = 0;

/// General error, unspecified failure
pub const EXIT_ERROR: u8 = 1;

/// Bad arguments
pub const EXIT_USAGE: u8 = 2;

/// Malformed or unreadable configuration
pub const EXIT_CONFIG: u8 = 3;

/// Login, graph fetch or HTTP failure against the Zabbix frontend
pub const EXIT_FRONTEND: u8 = 4;

/// Report mail could not be built or delivered
pub const EXIT_MAIL: u8 = 5;

/// SMS gateway unreachable or answered garbage
pub const EXIT_SMS_GATEWAY: u8 = 6;

/// SMS gateway answered with a non-success status code
pub const EXIT_SMS_REJECTED: u8 = 7;
