//! IP Address Checks
//!
//! IPv4, IPv6 and IPvFuture literals with an optional CIDR prefix.

use std::net::IpAddr;

use ipnet::IpNet;
use thiserror::Error;

/// IP address version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpVersion {
    V4,
    V6,
    /// RFC 3986 IPvFuture literal (`v1.fe80::a+en1`)
    Future,
}

impl IpVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpVersion::V4 => "ipv4",
            IpVersion::V6 => "ipv6",
            IpVersion::Future => "ipvfuture",
        }
    }
}

/// Whether a CIDR prefix may, must or must not be present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CidrPolicy {
    #[default]
    Optional,
    Required,
    Forbidden,
}

impl CidrPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CidrPolicy::Optional => "optional",
            CidrPolicy::Required => "required",
            CidrPolicy::Forbidden => "forbidden",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IpFormatError {
    #[error("not a valid ip address")]
    Invalid,

    #[error("ip address version {0} is not allowed")]
    VersionNotAllowed(&'static str),

    #[error("ip address must include a CIDR prefix")]
    CidrRequired,

    #[error("ip address must not include a CIDR prefix")]
    CidrForbidden,
}

/// Check an IP literal against allowed versions and CIDR policy
///
/// An empty `versions` slice allows every version.
pub fn check_ip(
    input: &str,
    versions: &[IpVersion],
    cidr: CidrPolicy,
) -> Result<IpVersion, IpFormatError> {
    let has_prefix = input.contains('/');
    match (cidr, has_prefix) {
        (CidrPolicy::Required, false) => return Err(IpFormatError::CidrRequired),
        (CidrPolicy::Forbidden, true) => return Err(IpFormatError::CidrForbidden),
        _ => {}
    }

    let version = if has_prefix {
        match input.parse::<IpNet>() {
            Ok(IpNet::V4(_)) => IpVersion::V4,
            Ok(IpNet::V6(_)) => IpVersion::V6,
            Err(_) => future_with_prefix(input).ok_or(IpFormatError::Invalid)?,
        }
    } else {
        match input.parse::<IpAddr>() {
            Ok(IpAddr::V4(_)) => IpVersion::V4,
            Ok(IpAddr::V6(_)) => IpVersion::V6,
            Err(_) if is_ipvfuture(input) => IpVersion::Future,
            Err(_) => return Err(IpFormatError::Invalid),
        }
    };

    if !versions.is_empty() && !versions.contains(&version) {
        return Err(IpFormatError::VersionNotAllowed(version.as_str()));
    }

    Ok(version)
}

fn future_with_prefix(input: &str) -> Option<IpVersion> {
    let (addr, prefix) = input.rsplit_once('/')?;
    let valid_prefix = !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit());
    (valid_prefix && is_ipvfuture(addr)).then_some(IpVersion::Future)
}

/// `"v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )`
fn is_ipvfuture(input: &str) -> bool {
    let Some(rest) = input.strip_prefix('v').or_else(|| input.strip_prefix('V')) else {
        return false;
    };
    let Some((version, body)) = rest.split_once('.') else {
        return false;
    };

    !version.is_empty()
        && version.chars().all(|c| c.is_ascii_hexdigit())
        && !body.is_empty()
        && body.chars().all(|c| {
            c.is_ascii_alphanumeric() || "-._~!$&'()*+,;=:".contains(c)
        })
}
