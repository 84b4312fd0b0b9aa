pub mod cash_flows;
pub mod single_amount;
pub mod weighted_returns;
