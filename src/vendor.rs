//! Vendor admissibility filter
//!
//! Decides whether a leaf descriptor can be resolved for a target of a
//! given vendor. OIDs outside the shared vendor-enterprise prefix are
//! standard and admissible for every vendor; OIDs under it must match
//! the target vendor's enterprise sub-identifier.

use crate::config::{LeafPath, VendorOids};
use rustc_hash::FxHashMap;

/// Vendor filter state: the shared prefix and the per-vendor
/// sub-identifier table, immutable after construction.
#[derive(Debug)]
pub struct VendorFilter {
    vendor_root: String,
    vendors: FxHashMap<String, String>,
}

impl VendorFilter {
    /// Build a filter from the vendor identifier document.
    pub fn new(vendor_oids: VendorOids) -> Self {
        Self {
            vendor_root: vendor_oids.vendor_root,
            vendors: vendor_oids.vendors.into_iter().collect(),
        }
    }

    /// True if at least one of the leaf's OIDs is admissible for the
    /// given vendor. OIDs are consulted in declaration order; an OID
    /// rooted under an unknown vendor's prefix is skipped, not fatal.
    pub fn admits(&self, leaf: &LeafPath, vendor: &str) -> bool {
        for oid in &leaf.oids {
            if !oid.starts_with(&self.vendor_root) {
                // Standard, vendor-neutral path.
                return true;
            }
            let Some(sub_id) = self.vendors.get(vendor) else {
                continue;
            };
            let scoped = format!("{}.{}", self.vendor_root, sub_id);
            if oid == &scoped || oid.starts_with(&format!("{scoped}.")) {
                return true;
            }
        }
        false
    }
}
