//! Checks shipped with monitorstack

pub mod conntrack;
pub mod kvm;
pub mod memcache;
pub mod os_block_pools;
pub mod os_common;
pub mod os_neutron_agents;
pub mod os_vm_quota;
pub mod os_vm_used;
pub mod process;
pub mod uptime;
pub mod vg_check;
