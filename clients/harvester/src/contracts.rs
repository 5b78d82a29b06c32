//! Contract interfaces generated via alloy's sol! macro.

use alloy::sol;

sol! {
    // Fee harvester: converts the fees accrued in each listed pair
    #[sol(rpc)]
    interface IFeeHarvester {
        function harvest(address[] calldata pairs) external;
    }

    // Optional follow-up contract rebalancing harvested proceeds
    #[sol(rpc)]
    interface IAdjuster {
        function adjust() external;
    }

    // Proxy forwarding its whole balance to the harvester
    #[sol(rpc)]
    interface IBalanceProxy {
        function transferBalance() external;
    }
}
