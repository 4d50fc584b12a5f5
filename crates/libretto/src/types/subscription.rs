//! Resource Subscription Types
//!
//! Types for resource subscription management.

use serde::{Deserialize, Serialize};

/// Subscribe request parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscribeParams {
    /// URI of resource to subscribe to
    pub uri: String,
}

/// Unsubscribe request parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnsubscribeParams {
    /// URI of resource to unsubscribe from
    pub uri: String,
}

/// Resource updated notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceUpdatedParams {
    /// URI of the updated resource
    pub uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_params_serialization() {
        let params = SubscribeParams {
            uri: "weather://current".to_string(),
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["uri"], "weather://current");
    }

    #[test]
    fn test_resource_updated_params() {
        let params: ResourceUpdatedParams =
            serde_json::from_value(serde_json::json!({ "uri": "weather://current" })).unwrap();
        assert_eq!(params.uri, "weather://current");
    }
}
