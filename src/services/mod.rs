// Service module exports

pub mod catalog;
pub mod countdown;
pub mod eligibility;
pub mod filter;
pub mod settings;
pub mod ticker;
