//! Choosing a device address from discovery candidates

use std::net::{IpAddr, Ipv4Addr};

/// Last IPv4 address among `candidates`, in the order given
///
/// Discovery can report link-local IPv6 addresses alongside the IPv4 one;
/// devices are only ever addressed over IPv4. When several IPv4 addresses
/// are announced, the one listed last wins.
pub fn select_ipv4<I>(candidates: I) -> Option<Ipv4Addr>
where
    I: IntoIterator<Item = IpAddr>,
{
    candidates
        .into_iter()
        .filter_map(|ip| match ip {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_last_ipv4_wins() {
        let candidates = [ip("fe80::1"), ip("192.168.1.40"), ip("10.0.0.9"), ip("fd00::2")];
        assert_eq!(select_ipv4(candidates), Some(Ipv4Addr::new(10, 0, 0, 9)));
        assert_eq!(
            select_ipv4([ip("fe80::1"), ip("192.168.1.40")]),
            Some(Ipv4Addr::new(192, 168, 1, 40))
        );
    }

    #[test]
    fn test_ipv6_only_has_no_candidate() {
        assert_eq!(select_ipv4([ip("fe80::1"), ip("::1")]), None);
        assert_eq!(select_ipv4(Vec::new()), None);
    }

    proptest! {
        #[test]
        fn prop_selection_is_the_last_v4(raw in proptest::collection::vec(any::<(bool, u32, u128)>(), 0..8)) {
            let candidates: Vec<IpAddr> = raw
                .iter()
                .map(|(v4, a, b)| if *v4 { IpAddr::from(Ipv4Addr::from(*a)) } else { IpAddr::from(std::net::Ipv6Addr::from(*b)) })
                .collect();

            let expected = candidates.iter().filter(|ip| ip.is_ipv4()).last().copied();
            prop_assert_eq!(select_ipv4(candidates.clone()).map(IpAddr::V4), expected);
        }
    }
}
