//! Property tests for USERS parsing and lookup.

use std::collections::HashMap;
use std::net::SocketAddr;

use proptest::prelude::*;
use turn_relay::auth::{parse_credentials, AuthHandler, StaticAuthHandler};

fn source() -> SocketAddr {
    "192.0.2.55:3478".parse().unwrap()
}

fn pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[A-Za-z0-9_]{1,8}", "[A-Za-z0-9_]{1,12}"), 1..16)
}

fn separator() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![" ", ",", " ; ", "\n", "\t, ", "  "])
}

fn noise() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["", "=orphan", "dangling=", "noequals", "!!", "=="])
}

proptest! {
    #[test]
    fn every_pair_is_reachable_and_last_wins(pairs in pairs(), sep in separator()) {
        let raw = pairs
            .iter()
            .map(|(user, pass)| format!("{user}={pass}"))
            .collect::<Vec<_>>()
            .join(sep);

        let expected: HashMap<_, _> = pairs.iter().cloned().collect();
        let handler = StaticAuthHandler::new(parse_credentials(&raw));

        prop_assert_eq!(handler.table().len(), expected.len());
        for (user, pass) in &expected {
            prop_assert_eq!(handler.lookup(user, source()), Some(pass.clone()));
        }
    }

    #[test]
    fn absent_users_are_not_found(pairs in pairs(), missing in "[a-z]{9,14}") {
        let raw = pairs
            .iter()
            .map(|(user, pass)| format!("{user}={pass}"))
            .collect::<Vec<_>>()
            .join(" ");

        let handler = StaticAuthHandler::new(parse_credentials(&raw));
        prop_assert_eq!(handler.lookup(&missing, source()), None);
    }

    #[test]
    fn malformed_fragments_are_skipped(pairs in pairs(), junk in prop::collection::vec(noise(), 1..6)) {
        let mut parts: Vec<String> = junk.iter().map(|j| j.to_string()).collect();
        parts.extend(pairs.iter().map(|(user, pass)| format!("{user}={pass}")));
        let raw = parts.join(" ");

        let expected: HashMap<_, _> = pairs.iter().cloned().collect();
        let table = parse_credentials(&raw);

        prop_assert_eq!(table.len(), expected.len());
        for (user, pass) in &expected {
            prop_assert_eq!(table.get(user), Some(pass.as_str()));
        }
    }
}
