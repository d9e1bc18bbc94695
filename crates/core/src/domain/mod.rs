pub mod access;
pub mod records;
pub mod statistics;

pub use access::AccessGate;
pub use records::RecordStore;
