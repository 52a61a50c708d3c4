pub(crate) mod columns;
pub mod net_dev;
pub mod net_stat;

pub use net_dev::ProcNetDevReader;
pub use net_stat::ProcNetStatReader;
