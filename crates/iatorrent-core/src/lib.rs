pub mod config;
pub mod logging;

pub mod dispatch;
pub mod exists;
pub mod failure_log;
pub mod fetch;
pub mod layout;
pub mod pool;
pub mod run;
pub mod worker;
