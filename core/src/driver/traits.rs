use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::DriverFault;

/// Boundary to the external device-automation driver.
///
/// For each registered tool name the driver accepts a parameter mapping and a
/// target identifier, returning an opaque success value or raising a fault.
/// The engine relays the value without interpreting it. Implementations must
/// be safe to share across runs driving different targets; one target must
/// only ever be driven by one replay run at a time (caller discipline, not
/// enforced here).
#[async_trait]
pub trait AutomationDriver: Send + Sync {
    async fn invoke(
        &self,
        tool: &str,
        params: &Map<String, Value>,
        target_id: &str,
    ) -> Result<Value, DriverFault>;
}

/// Driver used when no real device backend is wired in. Every invocation
/// fails with a clear message, which still exercises the full replay,
/// retry and reporting paths.
#[derive(Debug, Default)]
pub struct NullDriver;

#[async_trait]
impl AutomationDriver for NullDriver {
    async fn invoke(
        &self,
        tool: &str,
        _params: &Map<String, Value>,
        target_id: &str,
    ) -> Result<Value, DriverFault> {
        Err(DriverFault::new(format!(
            "no automation driver configured (tool '{tool}', target '{target_id}')"
        )))
    }
}
