//! Host facts used to derive a node identity
//!
//! Read once per process and cached.

use std::env;
use std::fs;

use once_cell::sync::Lazy;

const SYS_CLASS_NET: &str = "/sys/class/net";
const ETC_HOSTNAME: &str = "/etc/hostname";

const FNV_OFFSET_BASIS: u64 = 14695981039346656037;
const FNV_PRIME: u64 = 1099511628211;

static HARDWARE_ADDRESSES: Lazy<Option<String>> = Lazy::new(read_hardware_addresses);
static HOSTNAME: Lazy<Option<String>> = Lazy::new(read_hostname);

/// Upper-case hex of every non-zero interface hardware address, in interface name order
pub(crate) fn hardware_addresses() -> Option<&'static str> {
    HARDWARE_ADDRESSES.as_deref()
}

pub(crate) fn hostname() -> Option<&'static str> {
    HOSTNAME.as_deref()
}

/// FNV-1a over `bytes`
pub(crate) fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ b as u64).wrapping_mul(FNV_PRIME)
    })
}

/// Hash `text` into `0..=max`
pub(crate) fn reduce(text: &str, max: u64) -> u64 {
    (fnv1a(text.as_bytes()) & 0xffff) % (max + 1)
}

fn read_hardware_addresses() -> Option<String> {
    let mut interfaces: Vec<_> = fs::read_dir(SYS_CLASS_NET)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    interfaces.sort();

    let joined: String = interfaces
        .iter()
        .filter_map(|path| fs::read_to_string(path.join("address")).ok())
        .filter_map(|raw| normalize_address(&raw))
        .collect();

    (!joined.is_empty()).then_some(joined)
}

fn normalize_address(raw: &str) -> Option<String> {
    let hex: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ':' && *c != '-')
        .collect::<String>()
        .to_ascii_uppercase();

    let usable = !hex.is_empty()
        && hex.chars().all(|c| c.is_ascii_hexdigit())
        && hex.chars().any(|c| c != '0');
    usable.then_some(hex)
}

fn read_hostname() -> Option<String> {
    env::var("HOSTNAME")
        .ok()
        .or_else(|| fs::read_to_string(ETC_HOSTNAME).ok())
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
}
