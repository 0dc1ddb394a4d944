pub mod address;
pub mod balance;
pub mod info;
pub mod scan;
pub mod send;
pub mod withdraw;
