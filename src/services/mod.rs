pub mod oracle;

pub use oracle::{EtherscanOracle, GasOracle, ETHERSCAN_GAS_ORACLE_URL};
