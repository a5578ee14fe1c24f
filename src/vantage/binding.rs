//! Owned session value for a bound custom resolver.

use std::net::IpAddr;

use super::VantageProvider;
use crate::error_handling::ResolverBindError;

/// An active custom-resolver binding.
///
/// The binding is a host-wide resource: only one may exist at a time, and the
/// orchestrator holds it for exactly one nameserver-address iteration.
/// Release is explicit ([`ResolverBinding::release`]) because restoring the
/// default resolver is an async provider call; a binding dropped without
/// release is logged, and the end-of-run reset restores the default resolver
/// regardless.
#[must_use = "a binding left unreleased keeps the custom resolver active"]
pub struct ResolverBinding<'a> {
    provider: &'a dyn VantageProvider,
    addr: IpAddr,
    released: bool,
}

impl<'a> ResolverBinding<'a> {
    /// Binds `addr` as the active resolver at the provider.
    pub async fn bind(
        provider: &'a dyn VantageProvider,
        addr: IpAddr,
    ) -> Result<ResolverBinding<'a>, ResolverBindError> {
        provider.set_custom_resolver(addr).await?;
        log::debug!("bound custom resolver {addr}");
        Ok(ResolverBinding {
            provider,
            addr,
            released: false,
        })
    }

    /// Address this binding points at.
    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    /// Restores the default resolver, consuming the binding.
    pub async fn release(mut self) -> Result<(), ResolverBindError> {
        self.released = true;
        log::debug!("releasing custom resolver {}", self.addr);
        self.provider.set_default_resolver().await
    }
}

impl Drop for ResolverBinding<'_> {
    fn drop(&mut self) {
        if !self.released {
            log::warn!(
                "resolver binding {} dropped without release; default resolver will be restored at end of run",
                self.addr
            );
        }
    }
}
