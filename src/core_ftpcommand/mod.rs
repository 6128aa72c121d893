// Here's the list of the FTP commands implemented
pub mod cwd;
pub mod dele;
pub mod list;
pub mod mkd;
pub mod noop;
pub mod pass;
pub mod pwd;
pub mod quit;
pub mod retr;
pub mod rnfr;
pub mod rnto;
pub mod stat;
pub mod stor;
pub mod syst;
pub mod type_;
pub mod user;

// Protocol definitions and dispatch
pub mod ftpcommand;
pub mod handlers;
pub mod reply;

// The utils and common functions are here
pub mod utils;

#[cfg(test)]
pub mod testing;
